//! Board module - manages the 4x4 tile grid
//!
//! Each cell is 0 (empty) or a power of two >= 2.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where both range 0..3, row-major order.

use arrayvec::ArrayVec;

use crate::types::{GRID_CELLS, GRID_SIZE};

/// The game grid - 4x4 tile values using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Flat array of values, row-major order (row * GRID_SIZE + col)
    cells: [u32; GRID_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; GRID_CELLS],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: u8, col: u8) -> Option<usize> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        Some((row as usize) * (GRID_SIZE as usize) + (col as usize))
    }

    /// Get tile value at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: u8, col: u8) -> Option<u32> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set tile value at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: u8, col: u8, value: u32) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if cell is empty (within bounds and zero)
    pub fn is_empty(&self, row: u8, col: u8) -> bool {
        matches!(self.get(row, col), Some(0))
    }

    /// Collect coordinates of all empty cells
    pub fn empty_cells(&self) -> ArrayVec<(u8, u8), GRID_CELLS> {
        let mut empty = ArrayVec::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if self.is_empty(row, col) {
                    empty.push((row, col));
                }
            }
        }
        empty
    }

    /// Count of non-zero cells
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Largest tile value on the board (0 when empty)
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// True when some horizontally or vertically adjacent pair holds
    /// equal non-zero values, i.e. a merge is still possible.
    pub fn has_adjacent_equal(&self) -> bool {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE - 1 {
                let v = self.get(row, col).unwrap_or(0);
                if v != 0 && self.get(row, col + 1) == Some(v) {
                    return true;
                }
            }
        }
        for row in 0..GRID_SIZE - 1 {
            for col in 0..GRID_SIZE {
                let v = self.get(row, col).unwrap_or(0);
                if v != 0 && self.get(row + 1, col) == Some(v) {
                    return true;
                }
            }
        }
        false
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [0; GRID_CELLS];
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u32; GRID_CELLS] {
        &self.cells
    }

    /// Copy the grid out as rows (for snapshots and display)
    pub fn to_rows(&self) -> [[u32; GRID_SIZE as usize]; GRID_SIZE as usize] {
        let mut rows = [[0; GRID_SIZE as usize]; GRID_SIZE as usize];
        for (i, &v) in self.cells.iter().enumerate() {
            rows[i / GRID_SIZE as usize][i % GRID_SIZE as usize] = v;
        }
        rows
    }

    /// Create from rows (handy in tests and fixtures)
    pub fn from_rows(rows: [[u32; GRID_SIZE as usize]; GRID_SIZE as usize]) -> Self {
        let mut board = Self::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                board.set(r as u8, c as u8, v);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
