//! Turn outcome events raised by the bomb manager
//!
//! Each event has a single handler slot. Registering replaces the previous
//! handler; an empty slot is a no-op. Handlers run synchronously on the
//! emitting call stack, so they cannot borrow the manager. Share state with
//! them through `Rc<RefCell<_>>` or `Rc<Cell<_>>`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BombEvent {
    /// A single bomb was caught by the paddle
    BombCaught,
    /// Every bomb of the turn has been caught (turn won)
    AllBombsCaught,
    /// A bomb hit the target line (turn lost, cascade begins)
    BombReachTarget,
    /// A bomb in the cascade detonated
    BombExplode,
    /// The cascade detonated its last bomb
    AllBombsExploded,
}

impl BombEvent {
    pub const ALL: [BombEvent; 5] = [
        BombEvent::BombCaught,
        BombEvent::AllBombsCaught,
        BombEvent::BombReachTarget,
        BombEvent::BombExplode,
        BombEvent::AllBombsExploded,
    ];

    fn slot(self) -> usize {
        match self {
            BombEvent::BombCaught => 0,
            BombEvent::AllBombsCaught => 1,
            BombEvent::BombReachTarget => 2,
            BombEvent::BombExplode => 3,
            BombEvent::AllBombsExploded => 4,
        }
    }
}

pub type EventHandler = Box<dyn FnMut()>;

#[derive(Default)]
pub struct EventHandlers {
    slots: [Option<EventHandler>; 5],
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `event`, replacing any previous one
    pub fn set(&mut self, event: BombEvent, handler: impl FnMut() + 'static) {
        self.slots[event.slot()] = Some(Box::new(handler));
    }

    pub fn clear(&mut self, event: BombEvent) {
        self.slots[event.slot()] = None;
    }

    pub fn is_set(&self, event: BombEvent) -> bool {
        self.slots[event.slot()].is_some()
    }

    pub fn emit(&mut self, event: BombEvent) {
        log::debug!("Event {:?}", event);
        if let Some(handler) = self.slots[event.slot()].as_mut() {
            handler();
        }
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<BombEvent> = BombEvent::ALL
            .into_iter()
            .filter(|e| self.is_set(*e))
            .collect();
        f.debug_struct("EventHandlers")
            .field("registered", &registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_unset_slot_is_noop() {
        let mut handlers = EventHandlers::new();
        handlers.emit(BombEvent::BombCaught);
        assert!(!handlers.is_set(BombEvent::BombCaught));
    }

    #[test]
    fn test_last_registration_wins() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut handlers = EventHandlers::new();

        let first = log.clone();
        handlers.set(BombEvent::BombExplode, move || first.borrow_mut().push("first"));
        let second = log.clone();
        handlers.set(BombEvent::BombExplode, move || second.borrow_mut().push("second"));

        handlers.emit(BombEvent::BombExplode);
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn test_slots_are_independent() {
        let count = Rc::new(RefCell::new(0));
        let mut handlers = EventHandlers::new();
        let c = count.clone();
        handlers.set(BombEvent::AllBombsCaught, move || *c.borrow_mut() += 1);

        handlers.emit(BombEvent::AllBombsExploded);
        assert_eq!(*count.borrow(), 0);
        handlers.emit(BombEvent::AllBombsCaught);
        assert_eq!(*count.borrow(), 1);

        handlers.clear(BombEvent::AllBombsCaught);
        handlers.emit(BombEvent::AllBombsCaught);
        assert_eq!(*count.borrow(), 1);
    }
}
