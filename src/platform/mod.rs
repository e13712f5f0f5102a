//! Platform abstraction layer
//!
//! Handles what the host feeds the simulation:
//! - Input events (edge-triggered key down/up for the four game actions)
//! - Time/ticks (60 Hz pacing with a capped catch-up)

pub mod input;
pub mod time;

pub use input::{GameAction, InputEvent, InputState};
pub use time::FramePacer;
