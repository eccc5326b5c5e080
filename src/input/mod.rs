//! Input module - translates device events into directional commands.
//!
//! The engine only understands `GameAction`; everything keyboard-specific
//! lives here.

pub mod map;

pub use map::{handle_key_event, should_quit};
