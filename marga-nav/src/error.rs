//! Error types for MargaNav

use thiserror::Error;

/// MargaNav error type
#[derive(Error, Debug)]
pub enum NavError {
    /// No grid path reaches the waypoint at this (zero-based) index
    #[error("could not find a route to waypoint {}", .index + 1)]
    UnreachableWaypoint { index: usize },

    #[error("expected 1 to 3 waypoints, got {0}")]
    InvalidWaypointCount(usize),

    #[error("Invalid floor plan: {0}")]
    InvalidFloorPlan(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<serde_yaml::Error> for NavError {
    fn from(e: serde_yaml::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_message_is_one_based() {
        let err = NavError::UnreachableWaypoint { index: 1 };
        assert_eq!(err.to_string(), "could not find a route to waypoint 2");
    }

    #[test]
    fn test_yaml_error_maps_to_config() {
        let err: NavError = serde_yaml::from_str::<u32>("[not, a, number]")
            .unwrap_err()
            .into();
        assert!(matches!(err, NavError::Config(_)));
    }
}
