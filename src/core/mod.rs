//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI, networking, or I/O.

pub mod board;
pub mod collapse;
pub mod game_state;
pub mod rng;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use collapse::{LineCollapse, TileSlide};
pub use game_state::{GameState, MoveResult, Spawn, TileMove};
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
