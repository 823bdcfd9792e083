//! Session: the aggregate that owns every piece of mutable game state, plus
//! the scheduler that drives it.
//!
//! # Invariants
//! - All state lives in one [`GameSession`]; every cadence borrows it mutably,
//!   so no cadence ever reads a stale copy.
//! - Input and ticks are ignored outside [`Phase::Playing`].
//! - Single-threaded. Cadences interleave in due-time order.

pub mod scheduler;
pub mod session;
pub mod timer;

pub use scheduler::{AI_INTERVAL, DEFAULT_MAX_CATCH_UP_TICKS, MOVEMENT_INTERVAL, Scheduler, TickCounts};
pub use session::{GameSession, InputEvent, MAX_HEALTH, Phase};
pub use timer::FrameTimer;
