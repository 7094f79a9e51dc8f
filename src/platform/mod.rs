//! Platform abstraction layer
//!
//! The simulation never polls devices. Frontends feed held key state in here
//! and get back one [`crate::sim::TickInput`] per tick.

pub mod input;

pub use input::{InputLatch, KeyState};
