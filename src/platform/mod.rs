//! Platform abstraction layer
//!
//! Concrete devices are bound elsewhere; this layer turns abstract key
//! events into per-tick simulation input and session commands.

pub mod input;

pub use input::{InputAction, InputEvent, InputState, SessionCommand};
