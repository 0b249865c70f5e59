//! Binary occupancy grid rasterized from zone rectangles.
//!
//! Every traffic-blocking zone is inflated by the plan's margin, clipped to
//! the plan bounds and stamped onto a flat row-major `Vec<bool>`. Once built
//! the grid is never modified, so it can be shared across threads freely.

use log::trace;

use super::frame::GridFrame;
use crate::core::{GridCoord, Rect, Zone};

/// Free/blocked field over the plan grid.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    frame: GridFrame,
    /// Blocked flags, row-major (`y * cols + x`)
    blocked: Vec<bool>,
}

impl OccupancyGrid {
    /// Rasterize `zones` into a grid over `frame`, inflating each blocking
    /// rectangle by `margin` plan units.
    ///
    /// Entrance zones and zero-area rectangles contribute nothing.
    pub fn build(frame: GridFrame, zones: &[Zone], margin: f32) -> Self {
        let mut blocked = vec![false; frame.cell_count()];
        let margin = margin.max(0.0);

        for zone in zones {
            if !zone.kind.blocks_traffic() || zone.rect.is_degenerate() {
                continue;
            }
            if let Some((min, max)) = Self::cell_range(&frame, &zone.rect.inflate(margin)) {
                for y in min.y..=max.y {
                    let row = y as usize * frame.cols();
                    for x in min.x..=max.x {
                        blocked[row + x as usize] = true;
                    }
                }
            }
        }

        let grid = Self { frame, blocked };
        trace!(
            "[Grid] Built {}x{} grid from {} zones, {} blocked",
            frame.cols(),
            frame.rows(),
            zones.len(),
            grid.blocked_count()
        );
        grid
    }

    /// Inclusive cell range covered by a rectangle after clipping to the plan.
    ///
    /// A cell is covered when the rectangle overlaps its interior, so the
    /// range runs from `floor(x0 / cell)` to `ceil(x1 / cell) - 1`.
    fn cell_range(frame: &GridFrame, rect: &Rect) -> Option<(GridCoord, GridCoord)> {
        let x0 = rect.x.max(0.0);
        let y0 = rect.y.max(0.0);
        let x1 = rect.max_x().min(frame.width());
        let y1 = rect.max_y().min(frame.height());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        let cs = frame.cell_size();
        let last_col = frame.cols() as i64 - 1;
        let last_row = frame.rows() as i64 - 1;
        let cx0 = ((x0 / cs).floor() as i64).clamp(0, last_col);
        let cy0 = ((y0 / cs).floor() as i64).clamp(0, last_row);
        let cx1 = ((x1 / cs).ceil() as i64 - 1).clamp(0, last_col);
        let cy1 = ((y1 / cs).ceil() as i64 - 1).clamp(0, last_row);
        if cx1 < cx0 || cy1 < cy0 {
            return None;
        }

        Some((
            GridCoord::new(cx0 as i32, cy0 as i32),
            GridCoord::new(cx1 as i32, cy1 as i32),
        ))
    }

    /// Grid geometry
    #[inline]
    pub fn frame(&self) -> &GridFrame {
        &self.frame
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> usize {
        self.frame.cols()
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> usize {
        self.frame.rows()
    }

    /// Is the coordinate inside the grid?
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        self.frame.is_valid_coord(coord)
    }

    /// Is the cell blocked? Out-of-bounds cells count as blocked.
    #[inline]
    pub fn is_blocked(&self, coord: GridCoord) -> bool {
        match self.frame.index(coord) {
            Some(idx) => self.blocked[idx],
            None => true,
        }
    }

    /// Is the cell inside the grid and free?
    #[inline]
    pub fn is_free(&self, coord: GridCoord) -> bool {
        !self.is_blocked(coord)
    }

    /// Is any in-bounds cell within Chebyshev `radius` of `coord` blocked?
    pub fn is_near_blocked(&self, coord: GridCoord, radius: u32) -> bool {
        let r = radius as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                let c = GridCoord::new(coord.x + dx, coord.y + dy);
                if self.frame.is_valid_coord(c) && self.is_blocked(c) {
                    return true;
                }
            }
        }
        false
    }

    /// Number of blocked cells
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Render as ASCII art, one row per line (`#` blocked, `.` free).
    ///
    /// `marker` is drawn as `E` when it falls inside the grid.
    pub fn to_ascii(&self, marker: Option<GridCoord>) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let c = GridCoord::new(x, y);
                let ch = if marker == Some(c) {
                    'E'
                } else if self.is_blocked(c) {
                    '#'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
