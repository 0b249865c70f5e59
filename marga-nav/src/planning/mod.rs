//! Route planning on the occupancy grid.
//!
//! This module provides:
//! - Nearest free cell snapping for destinations
//! - A* search (4-connected, Manhattan heuristic)
//! - Multi-waypoint composition and straight-run simplification
//! - Corner smoothing for display
//! - [`RoutePlanner`], which runs the whole pipeline for one request

mod astar;
mod compose;
mod route;
mod simplify;
mod smoother;
mod snap;

pub use astar::{AStarConfig, AStarPlanner, PathFailure, PathResult, find_path, path_exists};
pub use compose::compose;
pub use route::{MAX_WAYPOINTS, PlannerConfig, Route, RoutePlanner, RouteWaypoint};
pub use simplify::simplify;
pub use smoother::{PathSegment, PathSmoother, SmoothedPath, SmootherConfig};
pub use snap::{Snap, SnapOutcome, nearest_free};
