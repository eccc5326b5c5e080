//! Collapse - slide, merge, and re-pad one line of four tiles
//!
//! This is the single shared implementation used by all four move
//! directions. Line positions are in slide order: index 0 is the edge the
//! tiles move toward. Callers map line indices back to grid coordinates.

use arrayvec::ArrayVec;

use crate::types::GRID_SIZE;

/// Length of one collapsible line (a full row or column)
pub const LINE_LEN: usize = GRID_SIZE as usize;

/// Movement record for one source tile within a collapsed line.
///
/// `from` and `to` are line positions in slide order. Both partners of a
/// merge report the same `to` and carry `merged = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSlide {
    pub from: usize,
    pub to: usize,
    pub merged: bool,
}

/// Result of collapsing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCollapse {
    /// The line after sliding and merging, zero-padded to full length
    pub cells: [u32; LINE_LEN],
    /// Sum of values of tiles formed by merges in this line
    pub score_delta: u32,
    /// One record per non-zero source tile
    pub slides: ArrayVec<TileSlide, LINE_LEN>,
}

impl LineCollapse {
    /// True when the line differs from `before` in at least one position
    pub fn changed_from(&self, before: &[u32; LINE_LEN]) -> bool {
        self.cells != *before
    }
}

/// Collapse a line toward index 0.
///
/// Zeros are removed preserving relative order, then a single left-to-right
/// scan merges adjacent equal pairs. A tile formed by a merge never merges
/// again within the same collapse: `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`,
/// not `[8, 0, 0, 0]`. Ties resolve by position: the tile nearer the
/// destination edge merges with its inward neighbor first.
pub fn collapse(line: &[u32; LINE_LEN]) -> LineCollapse {
    // Non-zero values with their source positions, in slide order.
    let mut packed: ArrayVec<(usize, u32), LINE_LEN> = ArrayVec::new();
    for (i, &v) in line.iter().enumerate() {
        if v != 0 {
            packed.push((i, v));
        }
    }

    let mut cells = [0u32; LINE_LEN];
    let mut slides = ArrayVec::new();
    let mut score_delta = 0u32;

    let mut write = 0;
    let mut read = 0;
    while read < packed.len() {
        let (src, value) = packed[read];
        if read + 1 < packed.len() && packed[read + 1].1 == value {
            let (partner_src, _) = packed[read + 1];
            let merged_value = value * 2;
            cells[write] = merged_value;
            score_delta += merged_value;
            slides.push(TileSlide {
                from: src,
                to: write,
                merged: true,
            });
            slides.push(TileSlide {
                from: partner_src,
                to: write,
                merged: true,
            });
            read += 2;
        } else {
            cells[write] = value;
            slides.push(TileSlide {
                from: src,
                to: write,
                merged: false,
            });
            read += 1;
        }
        write += 1;
    }

    LineCollapse {
        cells,
        score_delta,
        slides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_slides_without_merge() {
        let result = collapse(&[0, 2, 0, 4]);
        assert_eq!(result.cells, [2, 4, 0, 0]);
        assert_eq!(result.score_delta, 0);
        assert_eq!(
            result.slides.as_slice(),
            &[
                TileSlide {
                    from: 1,
                    to: 0,
                    merged: false
                },
                TileSlide {
                    from: 3,
                    to: 1,
                    merged: false
                },
            ]
        );
    }

    #[test]
    fn test_collapse_merges_adjacent_pair() {
        let result = collapse(&[2, 2, 4, 0]);
        assert_eq!(result.cells, [4, 4, 0, 0]);
        assert_eq!(result.score_delta, 4);

        // Both merge partners land on position 0.
        assert!(result.slides[0].merged && result.slides[1].merged);
        assert_eq!(result.slides[0].to, 0);
        assert_eq!(result.slides[1].to, 0);
        assert!(!result.slides[2].merged);
    }

    #[test]
    fn test_collapse_merge_single_use() {
        // Each tile participates in at most one merge per collapse.
        let result = collapse(&[2, 2, 2, 2]);
        assert_eq!(result.cells, [4, 4, 0, 0]);
        assert_eq!(result.score_delta, 8);
    }

    #[test]
    fn test_collapse_tie_resolved_by_position() {
        // The tile nearest the destination edge merges first: the leading
        // pair of 2s combines, the trailing 2 slides behind the 4.
        let result = collapse(&[2, 2, 2, 0]);
        assert_eq!(result.cells, [4, 2, 0, 0]);
        assert_eq!(result.score_delta, 4);
    }

    #[test]
    fn test_collapse_merge_across_gap() {
        let result = collapse(&[2, 0, 0, 2]);
        assert_eq!(result.cells, [4, 0, 0, 0]);
        assert_eq!(result.score_delta, 4);
    }

    #[test]
    fn test_collapse_full_line_no_change() {
        let before = [2, 4, 8, 16];
        let result = collapse(&before);
        assert_eq!(result.cells, before);
        assert_eq!(result.score_delta, 0);
        assert!(!result.changed_from(&before));
        // Every tile still gets a provenance record, just with from == to.
        assert!(result.slides.iter().all(|s| s.from == s.to && !s.merged));
    }

    #[test]
    fn test_collapse_empty_line() {
        let result = collapse(&[0, 0, 0, 0]);
        assert_eq!(result.cells, [0, 0, 0, 0]);
        assert_eq!(result.score_delta, 0);
        assert!(result.slides.is_empty());
    }

    #[test]
    fn test_collapse_conserves_or_reduces_tiles() {
        let cases: [[u32; 4]; 5] = [
            [2, 2, 2, 2],
            [4, 4, 8, 8],
            [2, 0, 2, 4],
            [0, 0, 0, 2],
            [16, 8, 4, 2],
        ];
        for line in cases {
            let before = line.iter().filter(|&&v| v != 0).count();
            let result = collapse(&line);
            let after = result.cells.iter().filter(|&&v| v != 0).count();
            let merges = result.slides.iter().filter(|s| s.merged).count() / 2;
            assert_eq!(after, before - merges, "line {:?}", line);
        }
    }
}
