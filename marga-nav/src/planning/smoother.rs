//! Corner rounding for display routes.
//!
//! Turns the simplified vertex polyline into straight and quadratic segments:
//! - Each interior vertex is cut back toward its neighbors by the blend
//!   factor and replaced with a quadratic curve through the shrunken corner
//! - Corners close to blocked cells stay sharp, so the drawn route never
//!   swings into an obstacle's clearance
//!
//! The output is geometry only. Traversability is never recomputed here.

use serde::Serialize;

use crate::core::PlanPoint;
use crate::grid::OccupancyGrid;

/// Number of chords used when measuring a curve
const CURVE_LENGTH_STEPS: usize = 16;

/// Configuration for path smoothing.
#[derive(Clone, Debug, PartialEq)]
pub struct SmootherConfig {
    /// Fraction of each adjacent leg cut from a corner, in (0, 0.5]
    pub blend_factor: f32,
    /// Corners within this Chebyshev cell radius of a blocked cell stay sharp
    pub clearance_cells: u32,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            blend_factor: 0.35,
            clearance_cells: 1,
        }
    }
}

/// Type of path segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PathSegment {
    /// Straight line segment
    Line { start: PlanPoint, end: PlanPoint },
    /// Quadratic Bezier curve around a corner
    Quadratic {
        start: PlanPoint,
        control: PlanPoint,
        end: PlanPoint,
    },
}

impl PathSegment {
    /// Get the starting point of this segment.
    pub fn start_point(&self) -> PlanPoint {
        match self {
            PathSegment::Line { start, .. } | PathSegment::Quadratic { start, .. } => *start,
        }
    }

    /// Get the ending point of this segment.
    pub fn end_point(&self) -> PlanPoint {
        match self {
            PathSegment::Line { end, .. } | PathSegment::Quadratic { end, .. } => *end,
        }
    }

    /// Point at parameter `t` in [0, 1].
    pub fn point_at(&self, t: f32) -> PlanPoint {
        match *self {
            PathSegment::Line { start, end } => start.lerp(&end, t),
            PathSegment::Quadratic {
                start,
                control,
                end,
            } => {
                let a = start.lerp(&control, t);
                let b = control.lerp(&end, t);
                a.lerp(&b, t)
            }
        }
    }

    /// Get the length of this segment in plan units.
    ///
    /// Curves are measured along a fixed chord approximation.
    pub fn length(&self) -> f32 {
        match self {
            PathSegment::Line { start, end } => start.distance(end),
            PathSegment::Quadratic { .. } => {
                let mut prev = self.start_point();
                let mut total = 0.0;
                for k in 1..=CURVE_LENGTH_STEPS {
                    let p = self.point_at(k as f32 / CURVE_LENGTH_STEPS as f32);
                    total += prev.distance(&p);
                    prev = p;
                }
                total
            }
        }
    }
}

/// Smoothed path with segments.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SmoothedPath {
    /// Path segments, each starting where the previous one ended
    pub segments: Vec<PathSegment>,
    /// Total path length in plan units
    pub total_length: f32,
}

impl SmoothedPath {
    fn from_segments(segments: Vec<PathSegment>) -> Self {
        let total_length = segments.iter().map(|s| s.length()).sum();
        Self {
            segments,
            total_length,
        }
    }

    /// No drawable segments (degenerate route)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Approximate the path with points, sampling each curve with
    /// `steps_per_curve` chords.
    pub fn flatten(&self, steps_per_curve: usize) -> Vec<PlanPoint> {
        let steps = steps_per_curve.max(1);
        let Some(first) = self.segments.first() else {
            return Vec::new();
        };

        let mut points = vec![first.start_point()];
        for segment in &self.segments {
            match segment {
                PathSegment::Line { end, .. } => points.push(*end),
                PathSegment::Quadratic { .. } => {
                    points.extend((1..=steps).map(|k| segment.point_at(k as f32 / steps as f32)));
                }
            }
        }
        points
    }
}

/// Rounds route corners into quadratic curves.
pub struct PathSmoother<'a> {
    config: SmootherConfig,
    grid: Option<&'a OccupancyGrid>,
}

impl<'a> PathSmoother<'a> {
    /// Create a new path smoother with configuration.
    pub fn new(config: SmootherConfig) -> Self {
        Self { config, grid: None }
    }

    /// Create a new path smoother with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SmootherConfig::default())
    }

    /// Keep corners sharp near blocked cells of `grid`.
    pub fn with_clearance(mut self, grid: &'a OccupancyGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Smooth a vertex polyline.
    ///
    /// Fewer than two distinct points yield an empty path; two yield a
    /// single line.
    pub fn smooth(&self, points: &[PlanPoint]) -> SmoothedPath {
        let mut vertices: Vec<PlanPoint> = Vec::with_capacity(points.len());
        for &p in points {
            if vertices.last() != Some(&p) {
                vertices.push(p);
            }
        }

        let n = vertices.len();
        if n < 2 {
            return SmoothedPath::default();
        }

        let blend = self.config.blend_factor.clamp(0.0, 0.5);
        let mut segments = Vec::with_capacity(2 * n);
        let mut cursor = vertices[0];

        for w in vertices.windows(3) {
            let (prev, corner, next) = (w[0], w[1], w[2]);
            let m_in = corner.lerp(&prev, blend);
            let m_out = corner.lerp(&next, blend);

            if blend <= 0.0 || self.near_obstacle(&[corner, m_in, m_out]) {
                push_line(&mut segments, cursor, corner);
                cursor = corner;
                continue;
            }

            push_line(&mut segments, cursor, m_in);
            segments.push(PathSegment::Quadratic {
                start: m_in,
                control: corner,
                end: m_out,
            });
            cursor = m_out;
        }
        push_line(&mut segments, cursor, vertices[n - 1]);

        SmoothedPath::from_segments(segments)
    }

    fn near_obstacle(&self, points: &[PlanPoint]) -> bool {
        let Some(grid) = self.grid else {
            return false;
        };
        points.iter().any(|&p| {
            let cell = grid.frame().point_to_cell(p);
            grid.is_near_blocked(cell, self.config.clearance_cells)
        })
    }
}

fn push_line(segments: &mut Vec<PathSegment>, start: PlanPoint, end: PlanPoint) {
    if start != end {
        segments.push(PathSegment::Line { start, end });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Zone, ZoneKind};
    use crate::grid::GridFrame;
    use approx::assert_relative_eq;

    fn corner_path() -> Vec<PlanPoint> {
        vec![
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(100.0, 0.0),
            PlanPoint::new(100.0, 100.0),
        ]
    }

    fn assert_continuous(path: &SmoothedPath) {
        for pair in path.segments.windows(2) {
            assert_eq!(pair[0].end_point(), pair[1].start_point());
        }
    }

    #[test]
    fn test_two_points_single_line() {
        let path = PathSmoother::with_defaults()
            .smooth(&[PlanPoint::new(0.0, 0.0), PlanPoint::new(30.0, 40.0)]);
        assert_eq!(path.segments.len(), 1);
        assert!(matches!(path.segments[0], PathSegment::Line { .. }));
        assert_relative_eq!(path.total_length, 50.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let smoother = PathSmoother::with_defaults();
        assert!(smoother.smooth(&[]).is_empty());
        assert!(smoother.smooth(&[PlanPoint::new(5.0, 5.0)]).is_empty());
        assert!(
            smoother
                .smooth(&[PlanPoint::new(5.0, 5.0), PlanPoint::new(5.0, 5.0)])
                .is_empty()
        );
        assert!(smoother.smooth(&[]).flatten(8).is_empty());
    }

    #[test]
    fn test_corner_is_rounded() {
        let path = PathSmoother::with_defaults().smooth(&corner_path());

        assert_eq!(path.segments.len(), 3);
        assert_continuous(&path);
        match path.segments[1] {
            PathSegment::Quadratic {
                start,
                control,
                end,
            } => {
                assert_relative_eq!(start.x, 65.0, epsilon = 1e-4);
                assert_relative_eq!(start.y, 0.0);
                assert_eq!(control, PlanPoint::new(100.0, 0.0));
                assert_relative_eq!(end.x, 100.0);
                assert_relative_eq!(end.y, 35.0, epsilon = 1e-4);
            }
            other => panic!("expected a curve, got {:?}", other),
        }
        assert_eq!(path.segments[0].start_point(), PlanPoint::new(0.0, 0.0));
        assert_eq!(path.segments[2].end_point(), PlanPoint::new(100.0, 100.0));

        // The rounded corner is shorter than the sharp one
        assert!(path.total_length < 200.0);
        assert!(path.total_length > 180.0);
    }

    #[test]
    fn test_half_blend_joins_curves() {
        let points = vec![
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(100.0, 0.0),
            PlanPoint::new(100.0, 100.0),
            PlanPoint::new(200.0, 100.0),
        ];
        let smoother = PathSmoother::new(SmootherConfig {
            blend_factor: 0.5,
            clearance_cells: 1,
        });
        let path = smoother.smooth(&points);

        // line, curve, curve, line: no zero-length line between the curves
        assert_eq!(path.segments.len(), 4);
        assert_continuous(&path);
    }

    #[test]
    fn test_corner_near_obstacle_stays_sharp() {
        let frame = GridFrame::new(300.0, 300.0, 10.0).unwrap();
        // Blocked cell diagonally outside the corner at (100, 0)
        let zones = [Zone::new(110.0, 0.0, 10.0, 10.0, ZoneKind::Obstacle)];
        let grid = OccupancyGrid::build(frame, &zones, 0.0);
        let points: Vec<PlanPoint> = corner_path()
            .into_iter()
            .map(|p| p + PlanPoint::new(5.0, 5.0))
            .collect();

        let path = PathSmoother::with_defaults()
            .with_clearance(&grid)
            .smooth(&points);
        assert_eq!(path.segments.len(), 2);
        assert!(
            path.segments
                .iter()
                .all(|s| matches!(s, PathSegment::Line { .. }))
        );
        assert_eq!(path.segments[0].end_point(), PlanPoint::new(105.0, 5.0));
        assert_relative_eq!(path.total_length, 200.0);

        // Same corner on an open grid is rounded
        let open = OccupancyGrid::build(frame, &[], 0.0);
        let path = PathSmoother::with_defaults().with_clearance(&open).smooth(&points);
        assert_eq!(path.segments.len(), 3);
    }

    #[test]
    fn test_flatten() {
        let path = PathSmoother::with_defaults().smooth(&corner_path());
        let points = path.flatten(4);

        // start, end of first line, 4 curve samples, final point
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], PlanPoint::new(0.0, 0.0));
        assert_eq!(*points.last().unwrap(), PlanPoint::new(100.0, 100.0));

        let polyline: f32 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
        assert_relative_eq!(polyline, path.total_length, epsilon = 1.0);
    }
}
