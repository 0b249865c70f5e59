//! Default value functions for serde deserialization.

use crate::core::{PlanPoint, Zone};
use crate::layout;

pub fn plan_size() -> f32 {
    layout::PLAN_SIZE
}

pub fn cell_size() -> f32 {
    layout::CELL_SIZE
}

pub fn inflation_margin() -> f32 {
    layout::INFLATION_MARGIN
}

pub fn entrance() -> PlanPoint {
    layout::ENTRANCE
}

pub fn zones() -> Vec<Zone> {
    layout::reference_zones()
}

pub fn snap_radius_cells() -> u32 {
    30
}

pub fn max_iterations() -> usize {
    100_000
}

pub fn blend_factor() -> f32 {
    0.35
}

pub fn clearance_cells() -> u32 {
    1
}

pub fn turn_threshold_deg() -> f32 {
    45.0
}

pub fn units_per_meter() -> f32 {
    layout::UNITS_PER_METER
}

pub fn arrival_tolerance() -> f32 {
    15.0
}
