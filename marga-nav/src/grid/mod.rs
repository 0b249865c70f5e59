//! Floor plan rasterization.
//!
//! - [`GridFrame`]: plan bounds, cell size and point/cell conversion
//! - [`OccupancyGrid`]: immutable free/blocked field built from zones
//! - [`FloorPlan`]: validated plan owning its grid

mod floor_plan;
mod frame;
mod occupancy;

pub use floor_plan::FloorPlan;
pub use frame::GridFrame;
pub use occupancy::OccupancyGrid;
