//! Platform abstraction layer
//!
//! Handles the parts that sit outside the simulation:
//! - Input events arriving from another thread or callback
//! - Wall-clock pacing of the fixed tick

pub mod input;
pub mod time;

pub use input::{InputQueue, InputSender};
pub use time::FixedTicker;
