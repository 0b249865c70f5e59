//! Live guidance for a vehicle following a planned route.
//!
//! - [`NavigationState`]: forward-only segment tracking and progress
//! - [`generate_instructions`]: turn classification with leg distances

mod instructions;
mod progress;

pub use instructions::{
    GuidanceConfig, Instruction, TurnKind, generate_instructions, turn_angle_deg,
};
pub use progress::{GuidanceUpdate, NavigationState};
