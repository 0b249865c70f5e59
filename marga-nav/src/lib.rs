//! MargaNav: route planning and turn-by-turn guidance for parking facilities.
//!
//! Given a floor plan of axis-aligned zones (parking bays, obstacles and an
//! open entrance area) and one to three destinations, MargaNav computes a
//! drivable route from the fixed entrance through each destination in order
//! and tracks a vehicle's progress along it.
//!
//! ## Pipeline
//!
//! ```text
//! zones ──► OccupancyGrid ──► snap ──► A* per leg ──► compose ──► simplify ──► Route
//!                                                                               │
//!                                        smooth (display) ◄─────────────────────┤
//!                                        NavigationState::update(position) ◄────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marga_nav::{layout, NavigationState, PlanPoint, RoutePlanner};
//!
//! let plan = layout::reference_facility()?;
//! let planner = RoutePlanner::with_defaults(&plan);
//!
//! let route = planner.plan(&[PlanPoint::new(1300.0, 925.0)])?;
//! let curves = planner.smooth(&route);
//!
//! let mut nav = NavigationState::with_defaults(route);
//! let update = nav.update(PlanPoint::new(200.0, 400.0));
//! println!("{:.0}% - next: {:?}", update.progress_percent, update.instructions[0]);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Points, grid coordinates, zone rectangles
//! - [`grid`]: Coordinate mapping, occupancy grid, floor plan
//! - [`planning`]: Snapping, A*, composition, simplification, smoothing
//! - [`guidance`]: Progress tracking and turn instructions
//! - [`config`]: YAML configuration
//! - [`layout`]: The reference facility
//!
//! The occupancy grid is immutable once built and can be shared between
//! threads without locking. Routes and navigation states are plain values
//! owned by each request.

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod guidance;
pub mod layout;
pub mod planning;

pub use config::MargaConfig;
pub use core::{GridCoord, PlanPoint, Rect, Zone, ZoneKind};
pub use error::{NavError, Result};
pub use grid::{FloorPlan, GridFrame, OccupancyGrid};
pub use guidance::{GuidanceConfig, GuidanceUpdate, Instruction, NavigationState, TurnKind};
pub use planning::{
    AStarConfig, AStarPlanner, PathSegment, PathSmoother, PlannerConfig, Route, RoutePlanner,
    SmoothedPath, SmootherConfig, Snap, SnapOutcome,
};
