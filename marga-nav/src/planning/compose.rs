//! Multi-waypoint route composition.

use log::debug;

use super::astar::AStarPlanner;
use crate::core::GridCoord;
use crate::error::{NavError, Result};

/// Chain A* segments from `entrance` through each waypoint in order.
///
/// Every segment after the first starts at the previous segment's last cell,
/// so that cell is dropped when appending. The first failing segment aborts
/// the whole composition with the zero-based index of its waypoint.
pub fn compose(
    planner: &AStarPlanner<'_>,
    entrance: GridCoord,
    waypoints: &[GridCoord],
) -> Result<Vec<GridCoord>> {
    let mut cells: Vec<GridCoord> = Vec::new();
    let mut prev = entrance;

    for (index, &goal) in waypoints.iter().enumerate() {
        let result = planner.find_path(prev, goal);
        if !result.success {
            debug!(
                "[Compose] Waypoint {} at ({},{}) unreachable: {:?}",
                index + 1,
                goal.x,
                goal.y,
                result.failure_reason
            );
            return Err(NavError::UnreachableWaypoint { index });
        }

        let skip = if cells.is_empty() { 0 } else { 1 };
        cells.extend(result.path.into_iter().skip(skip));
        prev = goal;
    }

    debug!(
        "[Compose] {} waypoints -> {} cells",
        waypoints.len(),
        cells.len()
    );
    Ok(cells)
}
