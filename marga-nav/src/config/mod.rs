//! Unified configuration loading for MargaNav.
//!
//! Loads the facility layout and all tuning from a single YAML file with
//! defaults for everything; the built-in defaults describe the reference
//! facility.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marga_nav::config::MargaConfig;
//!
//! // Load from default path (configs/marga.yaml)
//! let config = MargaConfig::load_default()?;
//!
//! // Build the plan and the runtime configs
//! let plan = config.build_floor_plan()?;
//! let planner = RoutePlanner::new(&plan, config.to_planner_config());
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`FloorPlanSection`] | Plan bounds, cell size, inflation margin, entrance |
//! | `zones` | Zone rectangles (`kind` accepts the Korean signage labels) |
//! | [`PlanningSection`] | Snap radius, A* expansion limit |
//! | [`SmoothingSection`] | Corner blend factor, obstacle clearance |
//! | [`GuidanceSection`] | Turn threshold, units per meter, arrival radius |
//!
//! ## Example YAML
//!
//! ```yaml
//! floor_plan:
//!   width: 2000
//!   height: 2000
//!   cell_size: 30
//!   inflation_margin: 10
//!   entrance: { x: 200, y: 200 }
//! zones:
//!   - { x: 550, y: 1050, width: 800, height: 300, kind: obstacle }
//!   - { x: 0, y: 0, width: 400, height: 400, kind: 입출차 }
//! smoothing:
//!   blend_factor: 0.35
//! ```

mod defaults;
mod marga;
mod sections;

pub use marga::{DEFAULT_CONFIG_PATH, MargaConfig};
pub use sections::{FloorPlanSection, GuidanceSection, PlanningSection, SmoothingSection};
