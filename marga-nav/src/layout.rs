//! Reference parking facility.
//!
//! A 2000 × 2000 unit lot (50 units per meter, so 40 m square) with the
//! entrance in the top-left corner:
//!
//! ```text
//!   0        400                                 2000
//!   +--------+----------------------------------+
//!   |Entrance|///////// restricted //////////////|
//!   |  (E)   |                                  |
//!   +        +---- 6 general bays ----+  empty  | 400
//!   |        |G |G |G |G |G |G        | pillar  |
//!   |        +------------------------+---------+ 800
//!   |                                 | 4 side  |
//!   |      +---- obstacle -----+      | general |
//!   |      +-------------------+      |  bays   |
//!   +--------------------------------------------+ 1600
//!   |D  |D  |G |G |G |V |V |  empty pillar        |
//!   +--------------------------------------------+ 2000
//! ```
//!
//! Drive lanes are whatever the zones leave open: the entrance column, the
//! band between the bays and the obstacle, and the band above the bottom row.

use crate::core::{PlanPoint, Zone, ZoneKind};
use crate::error::Result;
use crate::grid::FloorPlan;

/// Plan width and height in plan units
pub const PLAN_SIZE: f32 = 2000.0;
/// Grid cell edge in plan units
pub const CELL_SIZE: f32 = 30.0;
/// Clearance added around every blocking zone
pub const INFLATION_MARGIN: f32 = 10.0;
/// Route start point
pub const ENTRANCE: PlanPoint = PlanPoint { x: 200.0, y: 200.0 };
/// Plan units per meter
pub const UNITS_PER_METER: f32 = 50.0;

/// Zones of the reference facility
pub fn reference_zones() -> Vec<Zone> {
    let mut zones = vec![
        Zone::new(0.0, 1600.0, 300.0, 400.0, ZoneKind::Disabled).with_label("D1"),
        Zone::new(300.0, 1600.0, 300.0, 400.0, ZoneKind::Disabled).with_label("D2"),
        Zone::new(600.0, 1600.0, 200.0, 400.0, ZoneKind::General).with_label("B1"),
        Zone::new(800.0, 1600.0, 200.0, 400.0, ZoneKind::General).with_label("B2"),
        Zone::new(1000.0, 1600.0, 200.0, 400.0, ZoneKind::General).with_label("B3"),
        Zone::new(1200.0, 1600.0, 200.0, 400.0, ZoneKind::Electric).with_label("V1"),
        Zone::new(1400.0, 1600.0, 200.0, 400.0, ZoneKind::Electric).with_label("V2"),
        Zone::new(1600.0, 1600.0, 400.0, 400.0, ZoneKind::Empty),
        Zone::new(550.0, 1050.0, 800.0, 300.0, ZoneKind::Obstacle),
        Zone::new(1600.0, 400.0, 400.0, 400.0, ZoneKind::Empty),
        Zone::new(0.0, 0.0, 400.0, 400.0, ZoneKind::Entrance),
    ];

    zones.extend((0..6).map(|i| {
        Zone::new(400.0 + i as f32 * 200.0, 400.0, 200.0, 400.0, ZoneKind::General)
            .with_label(format!("A{}", i + 1))
    }));
    zones.extend((0..4).map(|i| {
        Zone::new(1600.0, 800.0 + i as f32 * 200.0, 400.0, 200.0, ZoneKind::General)
            .with_label(format!("C{}", i + 1))
    }));

    // Hatched no-entry strip along the top wall
    zones.push(Zone::new(400.0, 0.0, 1600.0, 400.0, ZoneKind::Obstacle).with_label("restricted"));
    zones
}

/// Build the reference facility floor plan.
pub fn reference_facility() -> Result<FloorPlan> {
    FloorPlan::new(
        PLAN_SIZE,
        PLAN_SIZE,
        CELL_SIZE,
        INFLATION_MARGIN,
        ENTRANCE,
        reference_zones(),
    )
}
