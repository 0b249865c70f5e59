//! Nearest free cell lookup for destination snapping.
//!
//! Destinations are usually picked inside a parking bay, which is blocked on
//! the grid. Snapping moves them to the closest traversable cell with an
//! expanding square-ring search around the target cell.

use log::{trace, warn};
use serde::Serialize;

use crate::core::{GridCoord, PlanPoint};
use crate::grid::OccupancyGrid;

/// How a target point was resolved to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SnapOutcome {
    /// The target's own cell was free
    Exact,
    /// A free cell was found on the ring at this Chebyshev distance
    Relocated { ring: u32 },
    /// No free cell within the search radius; the target's own (blocked)
    /// cell is returned and may not be reachable
    Fallback,
}

/// A target point resolved to a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Snap {
    /// Resolved cell
    pub cell: GridCoord,
    /// Center of the resolved cell in plan units
    pub point: PlanPoint,
    /// How the cell was found
    pub outcome: SnapOutcome,
}

impl Snap {
    /// Is the resolved cell guaranteed to be free?
    #[inline]
    pub fn is_traversable(&self) -> bool {
        !matches!(self.outcome, SnapOutcome::Fallback)
    }
}

/// Find the free cell closest to `point`, searching up to `max_radius` rings.
///
/// Each ring at Chebyshev distance `r` is scanned in a fixed order: the top
/// and bottom rows first (`dx` from `-r` to `r`, `dy` of `-r` then `r`),
/// then the remaining left and right columns (`dy` from `-r + 1` to `r - 1`,
/// `dx` of `-r` then `r`). The first free cell wins, so equidistant cells
/// resolve by scan order rather than Euclidean distance.
pub fn nearest_free(grid: &OccupancyGrid, point: PlanPoint, max_radius: u32) -> Snap {
    let frame = grid.frame();
    let origin = frame.point_to_cell(point);

    let resolved = |cell: GridCoord, outcome: SnapOutcome| Snap {
        cell,
        point: frame.cell_to_point_center(cell),
        outcome,
    };

    if grid.is_free(origin) {
        return resolved(origin, SnapOutcome::Exact);
    }

    for r in 1..=max_radius as i32 {
        if let Some(cell) = scan_ring(grid, origin, r) {
            trace!(
                "[Snap] ({:.1},{:.1}) -> cell ({},{}) on ring {}",
                point.x, point.y, cell.x, cell.y, r
            );
            return resolved(cell, SnapOutcome::Relocated { ring: r as u32 });
        }
    }

    warn!(
        "[Snap] No free cell within {} rings of ({:.1},{:.1}), using blocked cell ({},{})",
        max_radius, point.x, point.y, origin.x, origin.y
    );
    resolved(origin, SnapOutcome::Fallback)
}

/// First free cell on the ring at Chebyshev distance `r` around `origin`.
fn scan_ring(grid: &OccupancyGrid, origin: GridCoord, r: i32) -> Option<GridCoord> {
    let rows = (-r..=r).flat_map(|dx| [(dx, -r), (dx, r)]);
    let cols = (-r + 1..r).flat_map(|dy| [(-r, dy), (r, dy)]);

    rows.chain(cols)
        .map(|(dx, dy)| GridCoord::new(origin.x + dx, origin.y + dy))
        .find(|&c| grid.is_free(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Zone, ZoneKind};
    use crate::grid::GridFrame;

    fn grid_with(zones: &[Zone]) -> OccupancyGrid {
        OccupancyGrid::build(GridFrame::new(300.0, 300.0, 10.0).unwrap(), zones, 0.0)
    }

    #[test]
    fn test_free_cell_is_exact() {
        let grid = grid_with(&[]);
        let snap = nearest_free(&grid, PlanPoint::new(123.0, 47.0), 5);
        assert_eq!(snap.cell, GridCoord::new(12, 4));
        assert_eq!(snap.point, PlanPoint::new(125.0, 45.0));
        assert_eq!(snap.outcome, SnapOutcome::Exact);
        assert!(snap.is_traversable());
    }

    #[test]
    fn test_ring_scan_order() {
        // Single blocked cell at (15, 15): ring 1 starts at (dx=-1, dy=-1)
        let grid = grid_with(&[Zone::new(150.0, 150.0, 10.0, 10.0, ZoneKind::Obstacle)]);
        let snap = nearest_free(&grid, PlanPoint::new(155.0, 155.0), 3);
        assert_eq!(snap.cell, GridCoord::new(14, 14));
        assert_eq!(snap.outcome, SnapOutcome::Relocated { ring: 1 });
    }

    #[test]
    fn test_bottom_row_before_columns() {
        // Block everything around (15, 15) except (16, 16) and (14, 15).
        // (16, 16) lies on the bottom row of ring 1 and wins over the
        // left column cell (14, 15).
        let grid = grid_with(&[
            Zone::new(140.0, 140.0, 30.0, 10.0, ZoneKind::Obstacle),
            Zone::new(150.0, 150.0, 20.0, 10.0, ZoneKind::Obstacle),
            Zone::new(140.0, 160.0, 20.0, 10.0, ZoneKind::Obstacle),
        ]);
        assert!(grid.is_free(GridCoord::new(16, 16)));
        assert!(grid.is_free(GridCoord::new(14, 15)));

        let snap = nearest_free(&grid, PlanPoint::new(155.0, 155.0), 3);
        assert_eq!(snap.cell, GridCoord::new(16, 16));
    }

    #[test]
    fn test_relocates_to_larger_ring() {
        // 5x5 block centered on (15, 15): nearest free ring is 3
        let grid = grid_with(&[Zone::new(130.0, 130.0, 50.0, 50.0, ZoneKind::Obstacle)]);
        let snap = nearest_free(&grid, PlanPoint::new(155.0, 155.0), 10);
        assert_eq!(snap.outcome, SnapOutcome::Relocated { ring: 3 });
        assert_eq!(snap.cell, GridCoord::new(12, 12));
        assert!(grid.is_free(snap.cell));
    }

    #[test]
    fn test_fallback_when_radius_exhausted() {
        let grid = grid_with(&[Zone::new(100.0, 100.0, 110.0, 110.0, ZoneKind::Obstacle)]);
        let snap = nearest_free(&grid, PlanPoint::new(155.0, 155.0), 2);
        assert_eq!(snap.outcome, SnapOutcome::Fallback);
        assert_eq!(snap.cell, GridCoord::new(15, 15));
        assert_eq!(snap.point, PlanPoint::new(155.0, 155.0));
        assert!(!snap.is_traversable());
    }

    #[test]
    fn test_ring_skips_cells_outside_grid() {
        // Corner cell blocked; ring cells with negative indices must be ignored
        let grid = grid_with(&[Zone::new(0.0, 0.0, 10.0, 10.0, ZoneKind::Obstacle)]);
        let snap = nearest_free(&grid, PlanPoint::new(1.0, 1.0), 2);
        assert_eq!(snap.cell, GridCoord::new(0, 1));
        assert_eq!(snap.outcome, SnapOutcome::Relocated { ring: 1 });
    }
}
