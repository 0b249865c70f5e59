//! End-to-end route planning on a floor plan.
//!
//! [`RoutePlanner`] runs the whole pipeline for one request:
//! clamp → snap → compose → simplify → cell centers. Each request produces
//! a fresh [`Route`] value; replanning replaces the route rather than
//! editing it.

use log::{debug, warn};
use serde::Serialize;

use super::astar::{AStarConfig, AStarPlanner};
use super::compose::compose;
use super::simplify::simplify;
use super::smoother::{PathSmoother, SmoothedPath, SmootherConfig};
use super::snap::{Snap, nearest_free};
use crate::core::{GridCoord, PlanPoint};
use crate::error::{NavError, Result};
use crate::grid::FloorPlan;

/// Most waypoints a single request may chain
pub const MAX_WAYPOINTS: usize = 3;

/// Route planner configuration
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Ring search radius used when snapping destinations
    pub snap_radius_cells: u32,
    /// Grid search limits
    pub astar: AStarConfig,
    /// Corner rounding for [`RoutePlanner::smooth`]
    pub smoother: SmootherConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            snap_radius_cells: 30,
            astar: AStarConfig::default(),
            smoother: SmootherConfig::default(),
        }
    }
}

/// A requested destination and where it ended up on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RouteWaypoint {
    /// Point as supplied by the caller
    pub requested: PlanPoint,
    /// The point fell outside the plan and was clamped
    pub clamped: bool,
    /// Resolved free cell
    pub snap: Snap,
}

/// A planned route from the entrance through every waypoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Route {
    points: Vec<PlanPoint>,
    cells: Vec<GridCoord>,
    waypoints: Vec<RouteWaypoint>,
    length: f32,
}

impl Route {
    /// Build a route from a polyline, dropping repeated consecutive points.
    pub fn from_points(points: Vec<PlanPoint>) -> Self {
        Self::assemble(points, Vec::new(), Vec::new())
    }

    fn assemble(
        points: Vec<PlanPoint>,
        cells: Vec<GridCoord>,
        waypoints: Vec<RouteWaypoint>,
    ) -> Self {
        let mut deduped: Vec<PlanPoint> = Vec::with_capacity(points.len());
        for p in points {
            if deduped.last() != Some(&p) {
                deduped.push(p);
            }
        }
        let length = deduped.windows(2).map(|w| w[0].distance(&w[1])).sum();
        Self {
            points: deduped,
            cells,
            waypoints,
            length,
        }
    }

    /// Route polyline: entrance first, final snapped waypoint last
    #[inline]
    pub fn points(&self) -> &[PlanPoint] {
        &self.points
    }

    /// Simplified cell path the points were derived from
    #[inline]
    pub fn cells(&self) -> &[GridCoord] {
        &self.cells
    }

    /// Per-waypoint clamping and snapping results
    #[inline]
    pub fn waypoints(&self) -> &[RouteWaypoint] {
        &self.waypoints
    }

    /// Polyline length in plan units
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Polyline length in meters
    #[inline]
    pub fn length_meters(&self, units_per_meter: f32) -> f32 {
        self.length / units_per_meter
    }

    /// Fewer than two points: nothing to drive
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// Number of straight legs
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Final point of the route
    #[inline]
    pub fn destination(&self) -> Option<PlanPoint> {
        self.points.last().copied()
    }

    /// Were any of the requested waypoints outside the plan?
    pub fn any_clamped(&self) -> bool {
        self.waypoints.iter().any(|w| w.clamped)
    }
}

/// Plans routes on a single floor plan.
pub struct RoutePlanner<'a> {
    plan: &'a FloorPlan,
    config: PlannerConfig,
}

impl<'a> RoutePlanner<'a> {
    /// Create a new route planner
    pub fn new(plan: &'a FloorPlan, config: PlannerConfig) -> Self {
        Self { plan, config }
    }

    /// Create with default configuration
    pub fn with_defaults(plan: &'a FloorPlan) -> Self {
        Self::new(plan, PlannerConfig::default())
    }

    /// The floor plan routes are planned on
    pub fn floor_plan(&self) -> &FloorPlan {
        self.plan
    }

    /// Plan a route from the entrance through 1 to 3 waypoints in order.
    ///
    /// # Errors
    /// - [`NavError::InvalidWaypointCount`] for an empty or oversized list
    /// - [`NavError::UnreachableWaypoint`] when no grid path reaches a waypoint
    pub fn plan(&self, waypoints: &[PlanPoint]) -> Result<Route> {
        if waypoints.is_empty() || waypoints.len() > MAX_WAYPOINTS {
            return Err(NavError::InvalidWaypointCount(waypoints.len()));
        }

        let frame = self.plan.frame();
        let grid = self.plan.grid();

        let resolved: Vec<RouteWaypoint> = waypoints
            .iter()
            .enumerate()
            .map(|(i, &requested)| {
                let point = frame.clamp_point(requested);
                let clamped = point != requested;
                if clamped {
                    warn!(
                        "[Route] Waypoint {} ({:.1},{:.1}) outside plan, clamped to ({:.1},{:.1})",
                        i + 1,
                        requested.x,
                        requested.y,
                        point.x,
                        point.y
                    );
                }
                RouteWaypoint {
                    requested,
                    clamped,
                    snap: nearest_free(grid, point, self.config.snap_radius_cells),
                }
            })
            .collect();

        let goals: Vec<GridCoord> = resolved.iter().map(|w| w.snap.cell).collect();
        let planner = AStarPlanner::new(grid, self.config.astar.clone());
        let cells = simplify(&compose(&planner, self.plan.entrance_cell(), &goals)?);

        let mut points: Vec<PlanPoint> = cells
            .iter()
            .map(|&c| frame.cell_to_point_center(c))
            .collect();
        let destination = resolved[resolved.len() - 1].snap.point;
        match points.len() {
            // Entrance and destination share a cell
            0 | 1 => points = vec![self.plan.entrance(), destination],
            n => {
                points[0] = self.plan.entrance();
                points[n - 1] = destination;
            }
        }

        let route = Route::assemble(points, cells, resolved);
        debug!(
            "[Route] {} waypoints -> {} points, {:.1} units",
            waypoints.len(),
            route.points.len(),
            route.length
        );
        Ok(route)
    }

    /// Round the route's corners, keeping them sharp near obstacles.
    pub fn smooth(&self, route: &Route) -> SmoothedPath {
        PathSmoother::new(self.config.smoother.clone())
            .with_clearance(self.plan.grid())
            .smooth(route.points())
    }
}
