//! Frame-based sprite animation paced by a [`Clock`]

use crate::clock::Clock;
use crate::geometry::{Rect, Vec2};

#[derive(Debug, Clone)]
pub struct Animation {
    /// Source rectangles inside the sprite sheet
    frames: Vec<Rect>,
    /// Seconds each frame stays on screen
    frame_time: f32,
    frame_index: usize,
    timer: Clock,
    looping: bool,
    finished: bool,
}

impl Animation {
    pub fn new(frames: Vec<Rect>, frame_time: f32, looping: bool) -> Self {
        Self {
            frames,
            frame_time,
            frame_index: 0,
            timer: Clock::new(),
            looping,
            finished: false,
        }
    }

    /// Build an animation from `count` equally sized frames laid out
    /// left-to-right in a sheet row starting at `origin`.
    pub fn strip(
        origin: Vec2,
        frame_size: Vec2,
        count: usize,
        frame_time: f32,
        looping: bool,
    ) -> Self {
        let frames = (0..count)
            .map(|i| {
                Rect::new(
                    origin.x + frame_size.x * i as f32,
                    origin.y,
                    frame_size.x,
                    frame_size.y,
                )
            })
            .collect();
        Self::new(frames, frame_time, looping)
    }

    /// Rewind to the first frame
    pub fn start(&mut self) {
        self.frame_index = 0;
        self.timer.reset();
        self.finished = false;
    }

    /// Advance by `dt`. Returns `true` only on the update in which a
    /// one-shot animation plays past its last frame. A one-shot animation
    /// with no frames or no frame time completes on its first update.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }

        if self.frames.is_empty() || self.frame_time <= 0.0 {
            if self.looping {
                return false;
            }
            self.frame_index = self.frames.len().saturating_sub(1);
            self.finished = true;
            return true;
        }

        self.timer.update(dt);
        while self.timer.elapsed() >= self.frame_time {
            self.timer.consume(self.frame_time);

            if self.frame_index + 1 < self.frames.len() {
                self.frame_index += 1;
            } else if self.looping {
                self.frame_index = 0;
            } else {
                self.finished = true;
                return true;
            }
        }
        false
    }

    pub fn current_frame(&self) -> Option<Rect> {
        self.frames.get(self.frame_index).copied()
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
