//! Countdown timer core.
//!
//! - `classifier`: maps remaining time onto a [`TimerStatus`](crate::types::TimerStatus)
//! - `clock`: armable one-second tick source
//! - `engine`: the phase state machine that owns the countdown

pub mod classifier;
pub mod clock;
pub mod engine;

pub use classifier::classify;
pub use clock::{Clock, TICK_INTERVAL};
pub use engine::{TimerEngine, TimerUpdate};
