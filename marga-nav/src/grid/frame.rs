//! Coordinate mapping between the floor plan and its grid.

use serde::{Deserialize, Serialize};

use crate::core::{GridCoord, PlanPoint};
use crate::error::{NavError, Result};

/// Plan bounds and cell size, plus the derived grid dimensions.
///
/// The grid covers the plan from (0, 0). Cell (x, y) covers the area from
/// `(x * cell_size, y * cell_size)` to `((x + 1) * cell_size, (y + 1) * cell_size)`.
/// Cells along the right and bottom edges may extend past the plan bounds
/// when the plan size is not a multiple of the cell size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridFrame {
    width: f32,
    height: f32,
    cell_size: f32,
    cols: usize,
    rows: usize,
}

impl GridFrame {
    /// Create a frame for a `width × height` plan rasterized at `cell_size`.
    pub fn new(width: f32, height: f32, cell_size: f32) -> Result<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(NavError::InvalidFloorPlan(format!(
                "cell size must be positive, got {}",
                cell_size
            )));
        }
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(NavError::InvalidFloorPlan(format!(
                "plan bounds must be positive, got {}x{}",
                width, height
            )));
        }

        Ok(Self {
            width,
            height,
            cell_size,
            cols: (width / cell_size).ceil() as usize,
            rows: (height / cell_size).ceil() as usize,
        })
    }

    /// Plan width in plan units
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Plan height in plan units
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Cell edge length in plan units
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of grid columns (`ceil(width / cell_size)`)
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of grid rows (`ceil(height / cell_size)`)
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Is the coordinate inside the grid?
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.cols
            && (coord.y as usize) < self.rows
    }

    /// Flat row-major index of a valid coordinate
    #[inline]
    pub fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.cols + coord.x as usize)
        } else {
            None
        }
    }

    /// Coordinate of a flat row-major index
    #[inline]
    pub fn coord_of(&self, index: usize) -> GridCoord {
        GridCoord::new((index % self.cols) as i32, (index / self.cols) as i32)
    }

    /// Is the point inside `[0, width) × [0, height)`?
    #[inline]
    pub fn contains(&self, p: PlanPoint) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }

    /// Distance kept from the far plan edges when clamping.
    #[inline]
    fn clamp_epsilon(&self) -> f32 {
        (self.cell_size * 0.5).min(1.0)
    }

    /// Clamp a point into the plan bounds (minus an epsilon on the far edges).
    pub fn clamp_point(&self, p: PlanPoint) -> PlanPoint {
        let eps = self.clamp_epsilon();
        PlanPoint::new(
            p.x.clamp(0.0, self.width - eps),
            p.y.clamp(0.0, self.height - eps),
        )
    }

    /// Convert a plan point to the cell containing it, clamped into the grid.
    #[inline]
    pub fn point_to_cell(&self, p: PlanPoint) -> GridCoord {
        let cx = (p.x / self.cell_size).floor() as i64;
        let cy = (p.y / self.cell_size).floor() as i64;
        GridCoord::new(
            cx.clamp(0, self.cols as i64 - 1) as i32,
            cy.clamp(0, self.rows as i64 - 1) as i32,
        )
    }

    /// Convert a cell to the plan point at its center.
    #[inline]
    pub fn cell_to_point_center(&self, coord: GridCoord) -> PlanPoint {
        PlanPoint::new(
            (coord.x as f32 + 0.5) * self.cell_size,
            (coord.y as f32 + 0.5) * self.cell_size,
        )
    }
}
