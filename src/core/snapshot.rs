//! Point-in-time view of the engine, consumed by presentation layers.

use crate::types::GRID_SIZE;

/// Everything a front end needs to draw one frame.
///
/// Plain data, cheap to copy; produced by `GameState::snapshot_into` so a
/// render loop can reuse one allocationless instance per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u32; GRID_SIZE as usize]; GRID_SIZE as usize],
    pub score: u32,
    pub best_score: u32,
    pub game_over: bool,
    pub episode_id: u32,
    pub seed: u32,
    pub max_tile: u32,
    pub spawn_pending: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; GRID_SIZE as usize]; GRID_SIZE as usize],
            score: 0,
            best_score: 0,
            game_over: false,
            episode_id: 0,
            seed: 0,
            max_tile: 0,
            spawn_pending: false,
        }
    }
}
