//! Main MargaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Zone;
use crate::error::{NavError, Result};
use crate::grid::FloorPlan;
use crate::guidance::GuidanceConfig;
use crate::planning::PlannerConfig;

use super::defaults;
use super::sections::{FloorPlanSection, GuidanceSection, PlanningSection, SmoothingSection};

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "configs/marga.yaml";

/// Full MargaNav configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MargaConfig {
    /// Plan bounds, cell size, margin and entrance
    #[serde(default)]
    pub floor_plan: FloorPlanSection,

    /// Zone rectangles
    #[serde(default = "defaults::zones")]
    pub zones: Vec<Zone>,

    /// Snapping and search limits
    #[serde(default)]
    pub planning: PlanningSection,

    /// Corner smoothing
    #[serde(default)]
    pub smoothing: SmoothingSection,

    /// Driver guidance
    #[serde(default)]
    pub guidance: GuidanceSection,
}

impl Default for MargaConfig {
    /// The reference facility
    fn default() -> Self {
        Self {
            floor_plan: FloorPlanSection::default(),
            zones: defaults::zones(),
            planning: PlanningSection::default(),
            smoothing: SmoothingSection::default(),
            guidance: GuidanceSection::default(),
        }
    }
}

impl MargaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path, falling back to built-in defaults
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string and validate the tuning values
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the planning, smoothing and guidance values.
    ///
    /// Plan geometry is checked when the floor plan is built.
    pub fn validate(&self) -> Result<()> {
        if self.planning.max_iterations == 0 {
            return Err(NavError::Config("planning.max_iterations must be > 0".to_string()));
        }

        let blend = self.smoothing.blend_factor;
        if !(0.0..=0.5).contains(&blend) {
            return Err(NavError::Config(format!(
                "smoothing.blend_factor must be within [0, 0.5], got {}",
                blend
            )));
        }

        let guidance = &self.guidance;
        if !(guidance.turn_threshold_deg > 0.0 && guidance.turn_threshold_deg < 180.0) {
            return Err(NavError::Config(format!(
                "guidance.turn_threshold_deg must be within (0, 180), got {}",
                guidance.turn_threshold_deg
            )));
        }
        if !(guidance.units_per_meter.is_finite() && guidance.units_per_meter > 0.0) {
            return Err(NavError::Config(format!(
                "guidance.units_per_meter must be > 0, got {}",
                guidance.units_per_meter
            )));
        }
        if !(guidance.arrival_tolerance.is_finite() && guidance.arrival_tolerance >= 0.0) {
            return Err(NavError::Config(format!(
                "guidance.arrival_tolerance must be >= 0, got {}",
                guidance.arrival_tolerance
            )));
        }

        Ok(())
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the geometry and rasterize the zones
    pub fn build_floor_plan(&self) -> Result<FloorPlan> {
        let fp = &self.floor_plan;
        FloorPlan::new(
            fp.width,
            fp.height,
            fp.cell_size,
            fp.inflation_margin,
            fp.entrance,
            self.zones.clone(),
        )
    }

    /// Convert to PlannerConfig for RoutePlanner
    pub fn to_planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            snap_radius_cells: self.planning.snap_radius_cells,
            astar: self.planning.to_astar_config(),
            smoother: self.smoothing.to_smoother_config(),
        }
    }

    /// Convert to GuidanceConfig for NavigationState
    pub fn to_guidance_config(&self) -> GuidanceConfig {
        self.guidance.to_guidance_config()
    }
}
