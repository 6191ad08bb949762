//! Overlap between a tile placed on the canvas and the canvas bounds.
//!
//! Tile pixel `t` along an axis lands on canvas pixel `center - tile_size / 2 + t`.
//! [`clip`] returns the matching canvas and tile index ranges of the overlap, dropping
//! tile pixels that fall outside the canvas.
use std::ops::Range;

use crate::error::{Error, Result};

/// Matching canvas and tile index ranges for one placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipWindow {
    pub canvas_x: Range<usize>,
    pub canvas_y: Range<usize>,
    pub tile_x: Range<usize>,
    pub tile_y: Range<usize>,
}

impl ClipWindow {
    /// Verifies that canvas and tile ranges have equal lengths on both axes.
    pub fn check(&self) -> Result<()> {
        if self.canvas_x.len() != self.tile_x.len() {
            return Err(Error::ClipMismatch {
                axis: 'x',
                canvas: self.canvas_x.clone(),
                tile: self.tile_x.clone(),
            });
        }
        if self.canvas_y.len() != self.tile_y.len() {
            return Err(Error::ClipMismatch {
                axis: 'y',
                canvas: self.canvas_y.clone(),
                tile: self.tile_y.clone(),
            });
        }
        Ok(())
    }

    /// Returns `true` if the placement does not overlap the canvas.
    pub fn is_empty(&self) -> bool {
        self.canvas_x.is_empty() || self.canvas_y.is_empty()
    }

    /// Number of overlapping pixels.
    pub fn area(&self) -> usize {
        self.canvas_x.len() * self.canvas_y.len()
    }

    /// Returns `true` if the whole tile of `tile_size` pixels is used.
    pub fn is_full(&self, tile_size: usize) -> bool {
        self.tile_x == (0..tile_size) && self.tile_y == (0..tile_size)
    }
}

/// Clip a single axis. Returns `(canvas_range, tile_range)`.
pub fn clip_axis(extent: usize, center: isize, tile_size: usize) -> (Range<usize>, Range<usize>) {
    let origin = center - (tile_size / 2) as isize;
    let start = origin.max(0);
    let end = (origin + tile_size as isize).min(extent as isize);
    if end <= start {
        return (0..0, 0..0);
    }
    let canvas = start as usize..end as usize;
    let tile = (start - origin) as usize..(end - origin) as usize;
    (canvas, tile)
}

/// Overlap of a `tile_size` tile centred at `(center_x, center_y)` with a
/// `canvas_width x canvas_height` canvas.
pub fn clip(
    canvas_width: usize,
    canvas_height: usize,
    center_x: isize,
    center_y: isize,
    tile_size: usize,
) -> ClipWindow {
    let (canvas_x, tile_x) = clip_axis(canvas_width, center_x, tile_size);
    let (canvas_y, tile_y) = clip_axis(canvas_height, center_y, tile_size);
    ClipWindow {
        canvas_x,
        canvas_y,
        tile_x,
        tile_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NBLOCK: usize = 250;
    const HALF: usize = NBLOCK / 2;

    #[test]
    fn interior_placement_uses_full_tile() {
        for &(cx, cy) in &[(125, 125), (250, 300), (375, 375), (200, 131)] {
            let w = clip(500, 500, cx, cy, NBLOCK);
            assert!(w.check().is_ok());
            assert!(w.is_full(NBLOCK));
            assert_eq!(w.canvas_x, (cx as usize - HALF)..(cx as usize + HALF));
            assert_eq!(w.canvas_y, (cy as usize - HALF)..(cy as usize + HALF));
            assert_eq!(w.area(), NBLOCK * NBLOCK);
        }
    }

    #[test]
    fn origin_placement_keeps_upper_half_of_tile() {
        let w = clip(500, 400, 0, 0, NBLOCK);
        assert!(w.check().is_ok());
        assert_eq!(w.canvas_x, 0..HALF);
        assert_eq!(w.canvas_y, 0..HALF);
        assert_eq!(w.tile_x, HALF..NBLOCK);
        assert_eq!(w.tile_y, HALF..NBLOCK);
    }

    #[test]
    fn low_edge_tile_start_is_half_minus_center() {
        for cx in 0..HALF as isize {
            let (canvas, tile) = clip_axis(1000, cx, NBLOCK);
            assert_eq!(canvas.start, 0);
            assert_eq!(tile.start, HALF - cx as usize);
            assert_eq!(canvas.len(), tile.len());
            assert_eq!(tile.end, NBLOCK);
        }
    }

    #[test]
    fn high_edge_is_truncated_not_wrapped() {
        let (canvas, tile) = clip_axis(500, 499, NBLOCK);
        assert_eq!(canvas, 374..500);
        assert_eq!(tile, 0..126);

        let (canvas, tile) = clip_axis(500, 400, NBLOCK);
        assert_eq!(canvas, 275..500);
        assert_eq!(tile, 0..225);
    }

    #[test]
    fn matches_legacy_slice_formula_for_all_centres() {
        // Index arithmetic used by the reference simulator for an even tile size:
        // canvas [max(0, c - h), min(c + h, n)), tile [|min(0, c - h)|, min(b, b + n - (c + h))).
        let n: isize = 300;
        let b = NBLOCK as isize;
        let h = b / 2;
        for c in 0..n {
            let (canvas, tile) = clip_axis(n as usize, c, NBLOCK);
            let canvas_ref = (c - h).max(0) as usize..(c + h).min(n) as usize;
            let tile_ref = (c - h).min(0).unsigned_abs()..b.min(b + n - (c + h)) as usize;
            assert_eq!(canvas, canvas_ref, "canvas at c = {c}");
            assert_eq!(tile, tile_ref, "tile at c = {c}");
        }
    }

    #[test]
    fn ranges_stay_in_bounds_and_match_for_any_centre() {
        for tile_size in [1usize, 2, 7, 8, 250] {
            for extent in [1usize, 5, 9, 300] {
                for c in -(tile_size as isize)..(extent as isize + tile_size as isize) {
                    let (canvas, tile) = clip_axis(extent, c, tile_size);
                    assert_eq!(canvas.len(), tile.len());
                    assert!(canvas.end <= extent);
                    assert!(tile.end <= tile_size);
                    if !canvas.is_empty() {
                        // Tile pixel t maps to canvas pixel c - tile_size/2 + t.
                        let origin = c - (tile_size / 2) as isize;
                        assert_eq!(canvas.start as isize, origin + tile.start as isize);
                    }
                }
            }
        }
    }

    #[test]
    fn tile_larger_than_canvas_is_clipped_on_both_sides() {
        let w = clip(100, 60, 50, 30, NBLOCK);
        assert!(w.check().is_ok());
        assert_eq!(w.canvas_x, 0..100);
        assert_eq!(w.tile_x, 75..175);
        assert_eq!(w.canvas_y, 0..60);
        assert_eq!(w.tile_y, 95..155);
    }

    #[test]
    fn far_outside_placement_is_empty() {
        let w = clip(100, 100, -500, 50, NBLOCK);
        assert!(w.is_empty());
        assert!(w.check().is_ok());
        let w = clip(100, 100, 50, 1000, NBLOCK);
        assert!(w.is_empty());
    }

    #[test]
    fn check_reports_mismatched_axis() {
        let w = ClipWindow {
            canvas_x: 0..10,
            canvas_y: 0..10,
            tile_x: 0..10,
            tile_y: 3..10,
        };
        match w.check() {
            Err(Error::ClipMismatch { axis, .. }) => assert_eq!(axis, 'y'),
            other => panic!("expected ClipMismatch, got {other:?}"),
        }
    }
}
