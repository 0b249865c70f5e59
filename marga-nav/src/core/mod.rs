//! Core types for the MargaNav planning pipeline.
//!
//! ## Coordinates
//! - [`GridCoord`]: Integer cell indices for occupancy grid access
//! - [`PlanPoint`]: Floating-point floor plan coordinates in plan units
//!
//! ## Floor Plan Geometry
//! - [`Rect`]: Axis-aligned rectangle
//! - [`Zone`] and [`ZoneKind`]: Tagged rectangles (parking bays, obstacles, entrance)

mod point;
mod zone;

pub use point::{GridCoord, PlanPoint};
pub use zone::{Rect, Zone, ZoneKind};

use std::f32::consts::PI;

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle;
    while a >= PI {
        a -= 2.0 * PI;
    }
    while a < -PI {
        a += 2.0 * PI;
    }
    a
}
