//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions (the grid is square)
pub const GRID_SIZE: u8 = 4;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;

/// Delay between a successful collapse and the spawn of the new tile.
/// Purely pacing: the engine's guarantees hold with zero delay.
pub const SPAWN_DELAY_MS: u32 = 150;

/// Watchdog for a stuck pending spawn (force-clears the in-flight guard).
pub const MOVE_WATCHDOG_MS: u32 = 250;

/// Spawn distribution: `SPAWN_FOUR_IN_TEN` out of 10 spawns are a 4,
/// the rest are a 2.
pub const SPAWN_FOUR_IN_TEN: u32 = 1;

/// Move directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order (useful for legality scans).
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Move(Direction),
    NewGame,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "newgame" | "restart" => Some(GameAction::NewGame),
            other => Direction::from_str(other).map(GameAction::Move),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(d) => d.as_str(),
            GameAction::NewGame => "newGame",
        }
    }
}
