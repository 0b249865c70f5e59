//! Zone rectangles for the floor plan.
//!
//! Every area drawn on the facility map is an axis-aligned rectangle tagged
//! with a [`ZoneKind`]. The kind is resolved once when the zone is ingested
//! (from config or from a display label) and never re-parsed afterwards.

use serde::{Deserialize, Serialize};

use super::point::PlanPoint;

/// Semantic zone type - what occupies this area of the floor plan?
///
/// - `General` - Regular parking bays
/// - `Electric` - EV charging bays
/// - `Disabled` - Accessible parking bays
/// - `Obstacle` - Structure, pillar block or restricted area
/// - `Empty` - Empty pillar area (not drivable)
/// - `Entrance` - Entrance/exit area, always kept open for the drive lane
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    /// Regular parking bays
    #[serde(alias = "일반")]
    General,

    /// EV charging bays
    #[serde(alias = "전기차")]
    Electric,

    /// Accessible parking bays
    #[serde(alias = "장애인")]
    Disabled,

    /// Structure or restricted area
    #[serde(alias = "장애물")]
    Obstacle,

    /// Empty pillar area
    #[serde(alias = "빈기둥")]
    Empty,

    /// Entrance/exit area
    #[serde(alias = "입출차", alias = "exit")]
    Entrance,
}

impl ZoneKind {
    /// Does this zone block vehicle traffic in the occupancy grid?
    ///
    /// Parking bays are destinations, not drive lanes, so they block the
    /// grid like any obstacle. Only the entrance/exit area stays open.
    #[inline]
    pub fn blocks_traffic(self) -> bool {
        !matches!(self, ZoneKind::Entrance)
    }

    /// Is this a parking bay a vehicle can be assigned to?
    #[inline]
    pub fn is_parking(self) -> bool {
        matches!(
            self,
            ZoneKind::General | ZoneKind::Electric | ZoneKind::Disabled
        )
    }

    /// Resolve a display label (English or the facility's Korean signage).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "general" | "일반" => Some(ZoneKind::General),
            "electric" | "전기차" => Some(ZoneKind::Electric),
            "disabled" | "장애인" => Some(ZoneKind::Disabled),
            "obstacle" | "장애물" => Some(ZoneKind::Obstacle),
            "empty" | "빈기둥" => Some(ZoneKind::Empty),
            "entrance" | "exit" | "입출차" => Some(ZoneKind::Entrance),
            _ => None,
        }
    }
}

/// Axis-aligned rectangle in plan units
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle with zero (or negative) area
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Grow by `margin` on all four sides
    #[inline]
    pub fn inflate(&self, margin: f32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Right edge
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Does the (closed) rectangle contain the point?
    #[inline]
    pub fn contains(&self, p: PlanPoint) -> bool {
        p.x >= self.x && p.x <= self.max_x() && p.y >= self.y && p.y <= self.max_y()
    }
}

/// A tagged rectangle on the floor plan
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Area covered by the zone
    #[serde(flatten)]
    pub rect: Rect,

    /// What occupies the area
    pub kind: ZoneKind,

    /// Optional display label (bay number, signage text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Zone {
    /// Create an unlabeled zone
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: ZoneKind) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind,
            label: None,
        }
    }

    /// Attach a display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
