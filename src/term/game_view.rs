//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The palette follows the classic 2048 colors: warm beige background,
//! brown board, tiles shading from cream (2) through orange (32) to gold
//! (1024 and up).

use crate::core::GameSnapshot;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::GRID_SIZE;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BACKGROUND: Rgb = Rgb::new(250, 248, 239);
const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_CELL: Rgb = Rgb::new(205, 193, 180);
const TEXT: Rgb = Rgb::new(119, 110, 101);
const TEXT_LIGHT: Rgb = Rgb::new(249, 246, 242);
const SCORE_BOX: Rgb = Rgb::new(187, 173, 160);

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 keeps tiles roughly square at typical glyph aspect ratios
        // and leaves room for "16384" inside a tile.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    fn board_px(&self) -> (u16, u16) {
        let n = GRID_SIZE as u16;
        // One column/row of gap between tiles and around the edge.
        (n * self.cell_w + n + 1, n * self.cell_h + n + 1)
    }

    /// Render a snapshot into the framebuffer, resizing it to the viewport.
    ///
    /// `status` is an optional transient message (e.g. a persistence
    /// failure) shown under the board without interrupting play.
    pub fn render_into(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        status: Option<&str>,
    ) {
        fb.resize(viewport.width, viewport.height);
        let base = CellStyle::colors(TEXT, BACKGROUND);
        fb.clear(base.into_cell(' '));

        let (board_w, board_h) = self.board_px();
        let header_h = 5;
        let total_h = header_h + board_h + 1;

        let start_x = viewport.width.saturating_sub(board_w) / 2;
        let start_y = viewport.height.saturating_sub(total_h) / 2;

        self.draw_header(fb, snap, start_x, start_y, board_w);

        let board_y = start_y + header_h;
        self.draw_board(fb, snap, start_x, board_y);

        // Footer: key hints, replaced by the status message when one is up.
        let footer_y = board_y + board_h;
        let footer = status.unwrap_or("arrows/wasd move · r new game · q quit");
        fb.put_str_centered(
            start_x,
            footer_y,
            board_w,
            footer,
            CellStyle {
                dim: true,
                ..base
            },
        );

        if snap.game_over {
            self.draw_game_over(fb, start_x, board_y, board_w, board_h);
        }
    }

    fn draw_header(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
        board_w: u16,
    ) {
        let title = CellStyle::colors(TEXT, BACKGROUND).bold();
        fb.put_str(start_x, start_y + 1, "2048", title);

        // Two score boxes, right-aligned over the board.
        let box_w: u16 = 11;
        let box_h: u16 = 4;
        let best_x = start_x + board_w.saturating_sub(box_w);
        let score_x = best_x.saturating_sub(box_w + 1);

        self.draw_score_box(fb, "SCORE", snap.score, score_x, start_y, box_w, box_h);
        self.draw_score_box(fb, "BEST", snap.best_score, best_x, start_y, box_w, box_h);
    }

    fn draw_score_box(
        &self,
        fb: &mut FrameBuffer,
        label: &str,
        value: u32,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    ) {
        let fill = CellStyle::colors(TEXT_LIGHT, SCORE_BOX);
        fb.draw_box(x, y, w, h, fill, fill);
        fb.put_str_centered(x, y + 1, w, label, fill);
        fb.put_str_centered(x, y + 2, w, &value.to_string(), fill.bold());
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let (board_w, board_h) = self.board_px();
        let board_style = CellStyle::colors(TEXT_LIGHT, BOARD_BG);
        fb.fill_rect(x, y, board_w, board_h, ' ', board_style);

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let value = snap.board[row as usize][col as usize];
                let tx = x + 1 + (col as u16) * (self.cell_w + 1);
                let ty = y + 1 + (row as u16) * (self.cell_h + 1);
                self.draw_tile(fb, tx, ty, value);
            }
        }
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, value: u32) {
        let (bg, fg) = tile_colors(value);
        let style = CellStyle::colors(fg, bg);
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);

        if value != 0 {
            let mid_y = y + self.cell_h / 2;
            fb.put_str_centered(x, mid_y, self.cell_w, &value.to_string(), style.bold());
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        // Washed-out veil over the board, message in the middle.
        let veil = CellStyle::colors(TEXT, Rgb::new(238, 228, 218));
        let mid_y = y + h / 2;
        fb.fill_rect(x, mid_y.saturating_sub(1), w, 3, ' ', veil);
        fb.put_str_centered(x, mid_y, w, "GAME OVER - press r to try again", veil.bold());
    }
}

/// Background and text color for a tile value, following the original
/// palette. Values beyond 2048 reuse the 2048 gold.
fn tile_colors(value: u32) -> (Rgb, Rgb) {
    match value {
        0 => (EMPTY_CELL, EMPTY_CELL),
        2 => (Rgb::new(238, 228, 218), TEXT),
        4 => (Rgb::new(237, 224, 200), TEXT),
        8 => (Rgb::new(242, 177, 121), TEXT_LIGHT),
        16 => (Rgb::new(245, 149, 99), TEXT_LIGHT),
        32 => (Rgb::new(246, 124, 95), TEXT_LIGHT),
        64 => (Rgb::new(246, 94, 59), TEXT_LIGHT),
        128 => (Rgb::new(237, 207, 114), TEXT_LIGHT),
        256 => (Rgb::new(237, 204, 97), TEXT_LIGHT),
        512 => (Rgb::new(237, 200, 80), TEXT_LIGHT),
        1024 => (Rgb::new(237, 197, 63), TEXT_LIGHT),
        _ => (Rgb::new(237, 194, 46), TEXT_LIGHT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_colors_distinct_up_to_2048() {
        let values = [2u32, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048];
        for pair in values.windows(2) {
            assert_ne!(tile_colors(pair[0]).0, tile_colors(pair[1]).0);
        }
        // Beyond 2048 falls back to the 2048 gold.
        assert_eq!(tile_colors(4096), tile_colors(2048));
    }

    #[test]
    fn test_render_fits_small_viewport_without_panic() {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(1, 1);
        let snap = GameSnapshot::default();
        view.render_into(&mut fb, &snap, Viewport::new(10, 5), None);
        assert_eq!(fb.width(), 10);
        assert_eq!(fb.height(), 5);
    }
}
