//! Board tests - grid storage and queries through the public API

use tui_2048::core::Board;
use tui_2048::types::{GRID_CELLS, GRID_SIZE};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.tile_count(), 0);
    assert_eq!(board.empty_cells().len(), GRID_CELLS);
    assert_eq!(board.max_tile(), 0);
    assert!(!board.is_full());

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            assert!(board.is_empty(row, col), "cell ({}, {})", row, col);
        }
    }
}

#[test]
fn test_board_out_of_bounds() {
    let mut board = Board::new();
    assert_eq!(board.get(GRID_SIZE, 0), None);
    assert_eq!(board.get(0, GRID_SIZE), None);
    assert!(!board.set(GRID_SIZE, 0, 2));
    assert!(!board.is_empty(GRID_SIZE, GRID_SIZE));
}

#[test]
fn test_board_fills_up() {
    let mut board = Board::new();
    let mut value = 2u32;
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            board.set(row, col, value);
            value *= 2;
        }
    }
    assert!(board.is_full());
    assert!(board.empty_cells().is_empty());
    assert_eq!(board.tile_count(), GRID_CELLS);
    assert_eq!(board.max_tile(), 2u32.pow(GRID_CELLS as u32));
}

#[test]
fn test_full_board_with_no_merge_possible() {
    let board = Board::from_rows([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
    ]);
    assert!(board.is_full());
    assert!(!board.has_adjacent_equal());
}

#[test]
fn test_full_board_with_horizontal_merge() {
    let board = Board::from_rows([
        [2, 2, 4, 8],
        [4, 8, 16, 2],
        [2, 4, 8, 16],
        [4, 8, 16, 2],
    ]);
    assert!(board.is_full());
    assert!(board.has_adjacent_equal());
}

#[test]
fn test_full_board_with_vertical_merge() {
    let board = Board::from_rows([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [2, 8, 16, 8],
    ]);
    assert!(board.is_full());
    assert!(board.has_adjacent_equal());
}

#[test]
fn test_clear() {
    let mut board = Board::from_rows([
        [2, 0, 0, 0],
        [0, 4, 0, 0],
        [0, 0, 8, 0],
        [0, 0, 0, 16],
    ]);
    board.clear();
    assert_eq!(board, Board::new());
}
