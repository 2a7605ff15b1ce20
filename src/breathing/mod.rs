//! Guided breathing exercise.
//!
//! [`cycle`] holds the pure phase state machine; [`session`] owns the single
//! ticker task that drives it once per second.

pub mod cycle;
pub mod session;

pub use cycle::{BreathCycle, BreathPattern, BreathPhase, BreathState};
pub use session::BreathingSession;
