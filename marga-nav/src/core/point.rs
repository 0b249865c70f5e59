//! Point and coordinate types for the floor plan and its grid.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance (max of x and y distance)
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Get the 4 cardinal neighbors in fixed order (+x, -x, +y, -y)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x - 1, self.y),
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x, self.y - 1),
        ]
    }

    /// Primitive direction of this coordinate treated as a step vector.
    ///
    /// Both components are divided by their greatest common divisor, so
    /// `(4, 0)` and `(1, 0)` share a direction while `(2, 1)` does not.
    /// The zero vector maps to itself.
    pub fn direction(&self) -> GridCoord {
        let g = gcd(self.x.unsigned_abs(), self.y.unsigned_abs()) as i32;
        if g == 0 {
            return *self;
        }
        GridCoord::new(self.x / g, self.y / g)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// Floor plan coordinates (plan units, f32)
///
/// The plan frame has its origin at the top-left corner of the facility,
/// X growing to the right and Y growing down the drawing.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanPoint {
    /// X coordinate in plan units
    pub x: f32,
    /// Y coordinate in plan units
    pub y: f32,
}

impl PlanPoint {
    /// Create a new plan point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: PlanPoint = PlanPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &PlanPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &PlanPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Heading from this point to another (radians, atan2 convention)
    #[inline]
    pub fn heading_to(&self, other: &PlanPoint) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Linear interpolation towards `other` (`t = 0` is self, `t = 1` is other)
    #[inline]
    pub fn lerp(&self, other: &PlanPoint, t: f32) -> PlanPoint {
        PlanPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Dot product with another point (as vectors)
    #[inline]
    pub fn dot(&self, other: &PlanPoint) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

impl From<(f32, f32)> for PlanPoint {
    fn from((x, y): (f32, f32)) -> Self {
        PlanPoint::new(x, y)
    }
}

impl Add for PlanPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        PlanPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for PlanPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        PlanPoint::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_coord_neighbors() {
        let c = GridCoord::new(5, 5);
        let n4 = c.neighbors_4();
        assert_eq!(n4[0], GridCoord::new(6, 5));
        assert_eq!(n4[1], GridCoord::new(4, 5));
        assert_eq!(n4[2], GridCoord::new(5, 6));
        assert_eq!(n4[3], GridCoord::new(5, 4));
        assert!(n4.iter().all(|n| n.manhattan_distance(&c) == 1));
    }

    #[test]
    fn test_grid_coord_direction() {
        assert_eq!(GridCoord::new(4, 0).direction(), GridCoord::new(1, 0));
        assert_eq!(GridCoord::new(0, -3).direction(), GridCoord::new(0, -1));
        assert_eq!(GridCoord::new(4, 2).direction(), GridCoord::new(2, 1));
        assert_eq!(GridCoord::new(-6, 9).direction(), GridCoord::new(-2, 3));
        assert_eq!(GridCoord::new(0, 0).direction(), GridCoord::new(0, 0));
    }

    #[test]
    fn test_plan_point_distance() {
        let a = PlanPoint::new(0.0, 0.0);
        let b = PlanPoint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
        assert!((a.distance_squared(&b) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_plan_point_lerp() {
        let a = PlanPoint::new(0.0, 10.0);
        let b = PlanPoint::new(10.0, 10.0);
        let p = a.lerp(&b, 0.35);
        assert!((p.x - 3.5).abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_plan_point_heading() {
        let origin = PlanPoint::ZERO;
        let east = PlanPoint::new(1.0, 0.0);
        let south = PlanPoint::new(0.0, 1.0);

        assert!((origin.heading_to(&east) - 0.0).abs() < 1e-6);
        assert!((origin.heading_to(&south) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
