//! Live progress tracking along a planned route.
//!
//! Tracks the leg the vehicle is on with a forward-only segment index:
//! the index only advances once the vehicle has left the current leg, so
//! cutting a corner or drifting sideways never sends guidance back to an
//! earlier leg. Routes that turn back on themselves are followed by
//! watching the projection onto the current leg reverse.

use log::{debug, trace};
use serde::Serialize;

use super::instructions::{GuidanceConfig, Instruction, TurnKind, generate_instructions};
use crate::core::PlanPoint;
use crate::planning::Route;

/// Squared distance (plan units) within which two legs count as equally near.
const LEG_TIE_EPSILON: f32 = 1e-3;

/// Guidance output for one position update.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GuidanceUpdate {
    /// Distance covered along the route, 0 to 100
    pub progress_percent: f32,
    /// Upcoming turns, ending with `Arrived`
    pub instructions: Vec<Instruction>,
    /// Leg the vehicle is on
    pub segment_index: usize,
    /// Vehicle position projected onto the route
    pub projected: PlanPoint,
    /// Within the arrival tolerance of the destination
    pub arrived: bool,
}

/// Navigation state for one route.
///
/// A new route means a new state; the segment index never decreases over
/// the lifetime of a state.
#[derive(Clone, Debug)]
pub struct NavigationState {
    route: Route,
    config: GuidanceConfig,
    /// Current segment index
    segment_index: usize,
    /// Furthest projection parameter reached on the current leg
    leg_peak: f32,
    /// Distance from the route start to each point
    cumulative: Vec<f32>,
    /// Last position passed to `update`
    position: Option<PlanPoint>,
}

impl NavigationState {
    /// Start tracking a route from its first leg.
    pub fn new(route: Route, config: GuidanceConfig) -> Self {
        let mut cumulative = Vec::with_capacity(route.points().len());
        let mut total = 0.0;
        for (i, p) in route.points().iter().enumerate() {
            if i > 0 {
                total += route.points()[i - 1].distance(p);
            }
            cumulative.push(total);
        }

        Self {
            route,
            config,
            segment_index: 0,
            leg_peak: 0.0,
            cumulative,
            position: None,
        }
    }

    /// Start tracking with default configuration.
    pub fn with_defaults(route: Route) -> Self {
        Self::new(route, GuidanceConfig::default())
    }

    /// The route being followed
    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Current segment index
    #[inline]
    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    /// Last reported vehicle position
    #[inline]
    pub fn position(&self) -> Option<PlanPoint> {
        self.position
    }

    /// Feed a new vehicle position and compute progress and instructions.
    pub fn update(&mut self, agent: PlanPoint) -> GuidanceUpdate {
        self.position = Some(agent);

        if self.route.is_degenerate() {
            let at = self.route.points().first().copied().unwrap_or(agent);
            return self.arrived_update(at);
        }

        self.advance_segment(agent);
        let points = self.route.points();

        let (seg, projected, distance) = self.project(agent);
        let total = self.route.length();
        let progress_percent = if total > 0.0 {
            (distance / total * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };

        let last = points.len() - 1;
        if self.segment_index + 1 == last
            && agent.distance(&points[last]) <= self.config.arrival_tolerance
        {
            debug!(
                "[Guidance] Arrived at ({:.1},{:.1})",
                points[last].x, points[last].y
            );
            return self.arrived_update(points[last]);
        }

        let mut remaining = Vec::with_capacity(points.len() - self.segment_index);
        remaining.push(agent);
        remaining.extend_from_slice(&points[self.segment_index + 1..]);
        let instructions = generate_instructions(&remaining, &self.config);

        trace!(
            "[Guidance] agent=({:.1},{:.1}) segment={} nearest={} progress={:.1}%",
            agent.x, agent.y, self.segment_index, seg, progress_percent
        );

        GuidanceUpdate {
            progress_percent,
            instructions,
            segment_index: self.segment_index,
            projected,
            arrived: false,
        }
    }

    /// Move the index past every leg the agent has left behind.
    ///
    /// A leg is passed once the agent projects beyond its end, or once the
    /// agent has moved onto the next leg: past that leg's start and closer
    /// to it than to the current one. The second case covers corners where
    /// the projection onto the finished leg stops short of its end, such as
    /// perpendicular turns and the short slanted leg out of the entrance.
    ///
    /// Where the next leg runs back over the current one both distances are
    /// equal. The tie goes to the next leg once the agent has come within the
    /// arrival tolerance of the current leg's end and its projection has
    /// since moved backwards. Zero-length legs are skipped. The last leg is
    /// never passed.
    fn advance_segment(&mut self, agent: PlanPoint) {
        let points = self.route.points();
        while self.segment_index + 2 < points.len() {
            let a = points[self.segment_index];
            let b = points[self.segment_index + 1];
            let c = points[self.segment_index + 2];

            let passed = match leg_parameter(a, b, agent) {
                None => true,
                Some(t) if t > 1.0 => true,
                Some(t) => {
                    self.leg_peak = self.leg_peak.max(t);
                    let turned_back = t < self.leg_peak
                        && (1.0 - self.leg_peak) * a.distance(&b) <= self.config.arrival_tolerance;

                    match leg_parameter(b, c, agent) {
                        Some(next) if next > 0.0 => {
                            let d_next = leg_distance_sq(b, c, agent);
                            let d_current = leg_distance_sq(a, b, agent);
                            let closer = d_next + LEG_TIE_EPSILON < d_current;
                            let tied = (d_next - d_current).abs() <= LEG_TIE_EPSILON;
                            closer || (turned_back && tied)
                        }
                        _ => false,
                    }
                }
            };
            if !passed {
                break;
            }
            self.segment_index += 1;
            self.leg_peak = 0.0;
            trace!("[Guidance] Advanced to segment {}", self.segment_index);
        }
    }

    /// Nearest point on the legs from the current index onward.
    ///
    /// Returns the leg, the projected point and the distance along the route
    /// to it. Ties go to the earliest leg, so an agent driving out along a
    /// lane the route later returns on is measured on the way out.
    fn project(&self, agent: PlanPoint) -> (usize, PlanPoint, f32) {
        let points = self.route.points();
        let mut best = (
            self.segment_index,
            points[self.segment_index],
            self.cumulative[self.segment_index],
        );
        let mut best_dist = f32::INFINITY;

        for i in self.segment_index..points.len() - 1 {
            let a = points[i];
            let b = points[i + 1];
            let ab = b - a;
            let len_sq = ab.dot(&ab);
            let t = if len_sq > 0.0 {
                ((agent - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let p = a.lerp(&b, t);
            let d = p.distance_squared(&agent);
            if d + LEG_TIE_EPSILON < best_dist {
                best_dist = d;
                best = (i, p, self.cumulative[i] + t * len_sq.sqrt());
            }
        }
        best
    }

    fn arrived_update(&self, at: PlanPoint) -> GuidanceUpdate {
        GuidanceUpdate {
            progress_percent: 100.0,
            instructions: vec![Instruction::new(TurnKind::Arrived, 0.0)],
            segment_index: self.segment_index,
            projected: at,
            arrived: true,
        }
    }
}

/// Scalar projection of `p` onto the leg `a -> b`, unclamped.
///
/// `None` for a zero-length leg.
fn leg_parameter(a: PlanPoint, b: PlanPoint, p: PlanPoint) -> Option<f32> {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    (len_sq > 0.0).then(|| (p - a).dot(&ab) / len_sq)
}

/// Squared distance from `p` to the closest point of the leg `a -> b`.
fn leg_distance_sq(a: PlanPoint, b: PlanPoint, p: PlanPoint) -> f32 {
    let t = leg_parameter(a, b, p).map_or(0.0, |t| t.clamp(0.0, 1.0));
    a.lerp(&b, t).distance_squared(&p)
}
