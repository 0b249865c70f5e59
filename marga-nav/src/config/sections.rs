//! Configuration sections and their conversion to runtime configs.

use serde::{Deserialize, Serialize};

use crate::core::PlanPoint;
use crate::guidance::GuidanceConfig;
use crate::planning::{AStarConfig, SmootherConfig};

use super::defaults;

/// Floor plan geometry section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanSection {
    /// Plan width (plan units)
    #[serde(default = "defaults::plan_size")]
    pub width: f32,

    /// Plan height (plan units)
    #[serde(default = "defaults::plan_size")]
    pub height: f32,

    /// Grid cell edge (plan units)
    #[serde(default = "defaults::cell_size")]
    pub cell_size: f32,

    /// Clearance added around blocking zones (plan units)
    #[serde(default = "defaults::inflation_margin")]
    pub inflation_margin: f32,

    /// Route start point
    #[serde(default = "defaults::entrance")]
    pub entrance: PlanPoint,
}

impl Default for FloorPlanSection {
    fn default() -> Self {
        Self {
            width: defaults::plan_size(),
            height: defaults::plan_size(),
            cell_size: defaults::cell_size(),
            inflation_margin: defaults::inflation_margin(),
            entrance: defaults::entrance(),
        }
    }
}

/// Route search section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanningSection {
    /// Ring search radius for destination snapping (cells)
    #[serde(default = "defaults::snap_radius_cells")]
    pub snap_radius_cells: u32,

    /// A* expansion limit per segment
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,
}

impl Default for PlanningSection {
    fn default() -> Self {
        Self {
            snap_radius_cells: defaults::snap_radius_cells(),
            max_iterations: defaults::max_iterations(),
        }
    }
}

impl PlanningSection {
    /// Convert to AStarConfig
    pub fn to_astar_config(&self) -> AStarConfig {
        AStarConfig {
            max_iterations: self.max_iterations,
        }
    }
}

/// Corner smoothing section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmoothingSection {
    /// Fraction of each leg cut from a corner (0, 0.5]
    #[serde(default = "defaults::blend_factor")]
    pub blend_factor: f32,

    /// Keep corners sharp within this many cells of an obstacle
    #[serde(default = "defaults::clearance_cells")]
    pub clearance_cells: u32,
}

impl Default for SmoothingSection {
    fn default() -> Self {
        Self {
            blend_factor: defaults::blend_factor(),
            clearance_cells: defaults::clearance_cells(),
        }
    }
}

impl SmoothingSection {
    /// Convert to SmootherConfig
    pub fn to_smoother_config(&self) -> SmootherConfig {
        SmootherConfig {
            blend_factor: self.blend_factor,
            clearance_cells: self.clearance_cells,
        }
    }
}

/// Driver guidance section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuidanceSection {
    /// Heading change announced as a turn (degrees)
    #[serde(default = "defaults::turn_threshold_deg")]
    pub turn_threshold_deg: f32,

    /// Plan units per meter
    #[serde(default = "defaults::units_per_meter")]
    pub units_per_meter: f32,

    /// Arrival radius around the destination (plan units)
    #[serde(default = "defaults::arrival_tolerance")]
    pub arrival_tolerance: f32,

    /// Announce vertices that are not turns
    #[serde(default)]
    pub announce_straight: bool,
}

impl Default for GuidanceSection {
    fn default() -> Self {
        Self {
            turn_threshold_deg: defaults::turn_threshold_deg(),
            units_per_meter: defaults::units_per_meter(),
            arrival_tolerance: defaults::arrival_tolerance(),
            announce_straight: false,
        }
    }
}

impl GuidanceSection {
    /// Convert to GuidanceConfig
    pub fn to_guidance_config(&self) -> GuidanceConfig {
        GuidanceConfig {
            turn_threshold_deg: self.turn_threshold_deg,
            units_per_meter: self.units_per_meter,
            arrival_tolerance: self.arrival_tolerance,
            announce_straight: self.announce_straight,
        }
    }
}
