//! Turn-by-turn instructions for the driver display.

use serde::Serialize;

use crate::core::{PlanPoint, normalize_angle};

/// Heading change (degrees) from which a vertex reads as turning back.
///
/// A full reversal normalizes to -180, so without this bound it would be
/// announced as a right turn.
pub const U_TURN_THRESHOLD_DEG: f32 = 150.0;

/// Configuration for guidance output.
#[derive(Clone, Debug, PartialEq)]
pub struct GuidanceConfig {
    /// Heading change (degrees) beyond which a vertex is announced as a turn
    pub turn_threshold_deg: f32,
    /// Plan units per meter, for reported distances
    pub units_per_meter: f32,
    /// Distance to the final point (plan units) that counts as arrived
    pub arrival_tolerance: f32,
    /// Emit `Straight` instructions at vertices below the turn threshold
    pub announce_straight: bool,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            turn_threshold_deg: 45.0,
            units_per_meter: 50.0,
            arrival_tolerance: 15.0,
            announce_straight: false,
        }
    }
}

/// What the driver does at the end of a leg.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// Continue through the vertex
    Straight,
    /// Turn left
    Left,
    /// Turn right
    Right,
    /// Turn back the way the vehicle came
    UTurn,
    /// Destination reached
    Arrived,
}

impl TurnKind {
    /// Short label for HUD display
    pub fn label(self) -> &'static str {
        match self {
            TurnKind::Straight => "straight",
            TurnKind::Left => "left",
            TurnKind::Right => "right",
            TurnKind::UTurn => "u-turn",
            TurnKind::Arrived => "arrived",
        }
    }
}

/// A turn and the distance driven before it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Instruction {
    /// Manoeuvre at the end of the distance
    pub kind: TurnKind,
    /// Distance to the turn in meters
    pub distance_m: f32,
}

impl Instruction {
    /// Instruction to perform `kind` after `distance_m` meters.
    pub fn new(kind: TurnKind, distance_m: f32) -> Self {
        Self { kind, distance_m }
    }
}

/// Signed heading change at `b` for the path `a -> b -> c`, in degrees
/// within [-180, 180). Positive values are announced as left turns.
pub fn turn_angle_deg(a: PlanPoint, b: PlanPoint, c: PlanPoint) -> f32 {
    let h1 = a.heading_to(&b);
    let h2 = b.heading_to(&c);
    normalize_angle(h2 - h1).to_degrees()
}

/// Classify every interior vertex of `path` and accumulate leg distances.
///
/// The result always ends with a single `Arrived` instruction carrying the
/// distance left after the last announced turn.
pub fn generate_instructions(path: &[PlanPoint], config: &GuidanceConfig) -> Vec<Instruction> {
    let mut points: Vec<PlanPoint> = Vec::with_capacity(path.len());
    for &p in path {
        if points.last() != Some(&p) {
            points.push(p);
        }
    }

    let mut instructions = Vec::new();
    let mut accumulated = 0.0;

    for w in points.windows(3) {
        accumulated += w[0].distance(&w[1]) / config.units_per_meter;

        let angle = turn_angle_deg(w[0], w[1], w[2]);
        let kind = if angle.abs() >= U_TURN_THRESHOLD_DEG {
            TurnKind::UTurn
        } else if angle > config.turn_threshold_deg {
            TurnKind::Left
        } else if angle < -config.turn_threshold_deg {
            TurnKind::Right
        } else if config.announce_straight {
            TurnKind::Straight
        } else {
            continue;
        };

        instructions.push(Instruction::new(kind, accumulated));
        accumulated = 0.0;
    }

    if let [.., before_last, last] = points.as_slice() {
        accumulated += before_last.distance(last) / config.units_per_meter;
    }
    instructions.push(Instruction::new(TurnKind::Arrived, accumulated));
    instructions
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(coords: &[(f32, f32)]) -> Vec<PlanPoint> {
        coords.iter().map(|&(x, y)| PlanPoint::new(x, y)).collect()
    }

    #[test]
    fn test_turn_angle_sign() {
        let a = PlanPoint::new(0.0, 0.0);
        let b = PlanPoint::new(100.0, 0.0);
        assert_relative_eq!(
            turn_angle_deg(a, b, PlanPoint::new(100.0, 100.0)),
            90.0,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            turn_angle_deg(a, b, PlanPoint::new(100.0, -100.0)),
            -90.0,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            turn_angle_deg(a, b, PlanPoint::new(200.0, 10.0)),
            5.711,
            epsilon = 1e-2
        );
    }

    #[test]
    fn test_left_then_right() {
        let path = pts(&[(0.0, 0.0), (500.0, 0.0), (500.0, 250.0), (1000.0, 250.0)]);
        let instructions = generate_instructions(&path, &GuidanceConfig::default());

        assert_eq!(instructions.len(), 3);
        assert_eq!(instructions[0].kind, TurnKind::Left);
        assert_relative_eq!(instructions[0].distance_m, 10.0);
        assert_eq!(instructions[1].kind, TurnKind::Right);
        assert_relative_eq!(instructions[1].distance_m, 5.0);
        assert_eq!(instructions[2].kind, TurnKind::Arrived);
        assert_relative_eq!(instructions[2].distance_m, 10.0);
    }

    #[test]
    fn test_shallow_bend_accumulates() {
        let path = pts(&[(0.0, 0.0), (100.0, 0.0), (200.0, 30.0), (200.0, 130.0)]);
        let instructions = generate_instructions(&path, &GuidanceConfig::default());

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].kind, TurnKind::Left);
        let first_two = 2.0 + (100.0f32 * 100.0 + 30.0 * 30.0).sqrt() / 50.0;
        assert_relative_eq!(instructions[0].distance_m, first_two, epsilon = 1e-4);
        assert_relative_eq!(instructions[1].distance_m, 2.0);
    }

    #[test]
    fn test_announce_straight() {
        let path = pts(&[(0.0, 0.0), (100.0, 0.0), (200.0, 0.0)]);
        let config = GuidanceConfig {
            announce_straight: true,
            ..GuidanceConfig::default()
        };
        let instructions = generate_instructions(&path, &config);
        assert_eq!(
            instructions,
            vec![
                Instruction::new(TurnKind::Straight, 2.0),
                Instruction::new(TurnKind::Arrived, 2.0)
            ]
        );

        let quiet = generate_instructions(&path, &GuidanceConfig::default());
        assert_eq!(quiet, vec![Instruction::new(TurnKind::Arrived, 4.0)]);
    }

    #[test]
    fn test_reversal_is_a_u_turn() {
        // Out to the end of a lane and back up it
        let path = pts(&[(45.0, 45.0), (465.0, 45.0), (255.0, 45.0)]);
        assert_relative_eq!(
            turn_angle_deg(path[0], path[1], path[2]),
            -180.0,
            epsilon = 1e-3
        );

        let instructions = generate_instructions(&path, &GuidanceConfig::default());
        assert_eq!(
            instructions,
            vec![
                Instruction::new(TurnKind::UTurn, 8.4),
                Instruction::new(TurnKind::Arrived, 4.2)
            ]
        );
        assert_eq!(TurnKind::UTurn.label(), "u-turn");

        // A sharp but partial reversal is still a right turn
        let sharp = pts(&[(0.0, 0.0), (100.0, 0.0), (0.0, -60.0)]);
        let instructions = generate_instructions(&sharp, &GuidanceConfig::default());
        assert_eq!(instructions[0].kind, TurnKind::Right);
    }

    #[test]
    fn test_degenerate_paths() {
        let config = GuidanceConfig::default();
        assert_eq!(
            generate_instructions(&[], &config),
            vec![Instruction::new(TurnKind::Arrived, 0.0)]
        );
        assert_eq!(
            generate_instructions(&pts(&[(5.0, 5.0), (5.0, 5.0)]), &config),
            vec![Instruction::new(TurnKind::Arrived, 0.0)]
        );
    }
}
