//! Immutable floor plan with its derived occupancy grid.

use log::{debug, warn};

use super::frame::GridFrame;
use super::occupancy::OccupancyGrid;
use crate::core::{GridCoord, PlanPoint, Zone};
use crate::error::{NavError, Result};

/// A parking facility floor plan.
///
/// Holds the plan bounds, the zone list and the entrance point, and owns the
/// occupancy grid rasterized from them. Nothing here changes after
/// construction; replanning on a different layout means building a new plan.
#[derive(Clone, Debug)]
pub struct FloorPlan {
    frame: GridFrame,
    margin: f32,
    entrance: PlanPoint,
    zones: Vec<Zone>,
    grid: OccupancyGrid,
}

impl FloorPlan {
    /// Validate the plan parameters and rasterize the zones.
    ///
    /// # Arguments
    /// * `width`, `height` - Plan bounds in plan units
    /// * `cell_size` - Grid cell edge length (> 0)
    /// * `margin` - Inflation margin applied to every blocking zone (>= 0)
    /// * `entrance` - Fixed route start point, must lie inside the plan on a
    ///   free cell
    /// * `zones` - Tagged rectangles
    pub fn new(
        width: f32,
        height: f32,
        cell_size: f32,
        margin: f32,
        entrance: PlanPoint,
        zones: Vec<Zone>,
    ) -> Result<Self> {
        let frame = GridFrame::new(width, height, cell_size)?;

        if !(margin.is_finite() && margin >= 0.0) {
            return Err(NavError::InvalidFloorPlan(format!(
                "inflation margin must be non-negative, got {}",
                margin
            )));
        }
        if !frame.contains(entrance) {
            return Err(NavError::InvalidFloorPlan(format!(
                "entrance ({}, {}) lies outside the {}x{} plan",
                entrance.x, entrance.y, width, height
            )));
        }

        let grid = OccupancyGrid::build(frame, &zones, margin);
        let entrance_cell = frame.point_to_cell(entrance);
        if grid.is_blocked(entrance_cell) {
            warn!(
                "[FloorPlan] Entrance cell ({}, {}) is blocked",
                entrance_cell.x, entrance_cell.y
            );
            return Err(NavError::InvalidFloorPlan(format!(
                "entrance ({}, {}) falls in a blocked cell, no route can start there",
                entrance.x, entrance.y
            )));
        }

        debug!(
            "[FloorPlan] {}x{} plan, {} zones -> {}x{} grid ({} blocked)",
            width,
            height,
            zones.len(),
            grid.width(),
            grid.height(),
            grid.blocked_count()
        );

        Ok(Self {
            frame,
            margin,
            entrance,
            zones,
            grid,
        })
    }

    /// Plan geometry and coordinate mapping
    #[inline]
    pub fn frame(&self) -> &GridFrame {
        &self.frame
    }

    /// Rasterized occupancy
    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Inflation margin in plan units
    #[inline]
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Fixed route start point
    #[inline]
    pub fn entrance(&self) -> PlanPoint {
        self.entrance
    }

    /// Grid cell containing the entrance
    #[inline]
    pub fn entrance_cell(&self) -> GridCoord {
        self.frame.point_to_cell(self.entrance)
    }

    /// Zones the plan was built from
    #[inline]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Zones whose (uninflated) rectangle contains the point
    pub fn zones_at(&self, p: PlanPoint) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(move |z| z.rect.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ZoneKind;

    #[test]
    fn test_floor_plan_builds_grid() {
        let zones = vec![Zone::new(550.0, 1050.0, 800.0, 300.0, ZoneKind::Obstacle)];
        let plan = FloorPlan::new(
            2000.0,
            2000.0,
            30.0,
            10.0,
            PlanPoint::new(200.0, 200.0),
            zones,
        )
        .unwrap();

        assert_eq!(plan.grid().width(), 67);
        assert_eq!(plan.entrance_cell(), GridCoord::new(6, 6));
        assert!(plan.grid().is_free(plan.entrance_cell()));

        // Inflated obstacle spans x 540..1360, y 1040..1360
        assert!(plan.grid().is_blocked(GridCoord::new(18, 34)));
        assert!(plan.grid().is_blocked(GridCoord::new(45, 45)));
        assert!(plan.grid().is_free(GridCoord::new(17, 34)));
        assert!(plan.grid().is_free(GridCoord::new(46, 45)));
        assert!(plan.grid().is_free(GridCoord::new(30, 33)));
    }

    #[test]
    fn test_floor_plan_rejects_bad_parameters() {
        let entrance = PlanPoint::new(10.0, 10.0);
        assert!(FloorPlan::new(100.0, 100.0, 0.0, 0.0, entrance, vec![]).is_err());
        assert!(FloorPlan::new(100.0, 100.0, 10.0, -1.0, entrance, vec![]).is_err());
        assert!(
            FloorPlan::new(100.0, 100.0, 10.0, 0.0, PlanPoint::new(150.0, 10.0), vec![]).is_err()
        );
    }

    #[test]
    fn test_blocked_entrance_is_rejected() {
        let entrance = PlanPoint::new(45.0, 45.0);

        // Inside an obstacle
        let zones = vec![Zone::new(0.0, 0.0, 100.0, 100.0, ZoneKind::Obstacle)];
        let err = FloorPlan::new(600.0, 600.0, 30.0, 10.0, entrance, zones).unwrap_err();
        assert!(matches!(err, NavError::InvalidFloorPlan(ref msg) if msg.contains("blocked")));

        // Free under the zone itself but covered by its inflation margin
        let zones = vec![Zone::new(65.0, 0.0, 100.0, 100.0, ZoneKind::General)];
        assert!(matches!(
            FloorPlan::new(600.0, 600.0, 30.0, 10.0, entrance, zones),
            Err(NavError::InvalidFloorPlan(_))
        ));

        // Entrance zones do not block
        let zones = vec![Zone::new(0.0, 0.0, 100.0, 100.0, ZoneKind::Entrance)];
        assert!(FloorPlan::new(600.0, 600.0, 30.0, 10.0, entrance, zones).is_ok());
    }

    #[test]
    fn test_zones_at() {
        let zones = vec![
            Zone::new(0.0, 0.0, 400.0, 400.0, ZoneKind::Entrance),
            Zone::new(400.0, 0.0, 200.0, 400.0, ZoneKind::General).with_label("A1"),
        ];
        let plan =
            FloorPlan::new(1000.0, 1000.0, 30.0, 10.0, PlanPoint::new(200.0, 200.0), zones)
                .unwrap();

        let hits: Vec<_> = plan.zones_at(PlanPoint::new(500.0, 100.0)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label.as_deref(), Some("A1"));
        assert_eq!(plan.zones_at(PlanPoint::new(800.0, 800.0)).count(), 0);
    }
}
