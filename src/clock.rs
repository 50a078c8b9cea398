//! Accumulating time source fed by per-frame delta time

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    elapsed: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Seconds accumulated since the last reset
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Consume `amount` seconds, keeping any remainder
    pub fn consume(&mut self, amount: f32) {
        self.elapsed = (self.elapsed - amount).max(0.0);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_accumulates() {
        let mut clock = Clock::new();
        clock.update(0.25);
        clock.update(0.5);
        assert!((clock.elapsed() - 0.75).abs() < 1e-6);

        clock.consume(0.5);
        assert!((clock.elapsed() - 0.25).abs() < 1e-6);

        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut clock = Clock::new();
        clock.update(-1.0);
        assert_eq!(clock.elapsed(), 0.0);
    }
}
