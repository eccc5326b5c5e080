//! Terminal 2048.
//!
//! The `core` module is the pure board engine (grid, collapse, scoring,
//! game-over detection); `input`, `term`, and `store` are the presentation
//! and persistence glue around it.

pub mod core;
pub mod input;
pub mod store;
pub mod term;
pub mod types;
