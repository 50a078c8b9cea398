//! Gameplay simulation
//!
//! Everything here is frame-driven and single-threaded:
//! - Callers advance time with `update(dt)` and draw afterwards
//! - Pooled bombs are always processed in pool order
//! - Outcome events fire synchronously on the call that caused them

pub mod bomb;
pub mod bomb_manager;
pub mod bomber;
pub mod events;
pub mod paddle;
pub mod session;
pub mod turn;

pub use bomb::{Bomb, BombSignal, BombState};
pub use bomb_manager::BombManager;
pub use bomber::Bomber;
pub use events::{BombEvent, EventHandlers};
pub use paddle::Paddle;
pub use session::{Session, SessionPhase};
pub use turn::{TurnInfo, TurnTable};
