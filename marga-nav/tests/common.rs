//! Test utilities for MargaNav integration tests.
//!
//! Helpers for building floor plans, random grids and a breadth-first
//! search oracle to check planner results against.

#![allow(dead_code)]

use std::collections::VecDeque;

use marga_nav::{
    FloorPlan, GridCoord, GridFrame, OccupancyGrid, PlanPoint, Rect, Zone, ZoneKind,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Entrance used by the single-obstacle scenarios.
pub const ENTRANCE: PlanPoint = PlanPoint { x: 200.0, y: 200.0 };

/// 2000 × 2000 plan, 30 unit cells, 10 unit margin, one central obstacle.
pub fn single_obstacle_plan() -> FloorPlan {
    FloorPlan::new(
        2000.0,
        2000.0,
        30.0,
        10.0,
        ENTRANCE,
        vec![Zone::new(550.0, 1050.0, 800.0, 300.0, ZoneKind::Obstacle)],
    )
    .unwrap()
}

/// Open plan with a walled pocket around (1000, 1000) that has no way in.
pub fn enclosed_pocket_plan() -> FloorPlan {
    let zones = box_walls(Rect::new(800.0, 800.0, 400.0, 400.0), 40.0);
    FloorPlan::new(2000.0, 2000.0, 30.0, 10.0, ENTRANCE, zones).unwrap()
}

/// Four obstacle walls of `thickness` lining the inside of `outer`.
pub fn box_walls(outer: Rect, thickness: f32) -> Vec<Zone> {
    vec![
        Zone::new(outer.x, outer.y, outer.width, thickness, ZoneKind::Obstacle),
        Zone::new(
            outer.x,
            outer.max_y() - thickness,
            outer.width,
            thickness,
            ZoneKind::Obstacle,
        ),
        Zone::new(outer.x, outer.y, thickness, outer.height, ZoneKind::Obstacle),
        Zone::new(
            outer.max_x() - thickness,
            outer.y,
            thickness,
            outer.height,
            ZoneKind::Obstacle,
        ),
    ]
}

/// Random unit-cell obstacles on a `size` × `size` grid with 1 unit cells.
pub fn random_zones(rng: &mut StdRng, size: usize, density: f64) -> Vec<Zone> {
    let mut zones = Vec::new();
    for y in 0..size {
        for x in 0..size {
            if rng.random_bool(density) {
                zones.push(Zone::new(x as f32, y as f32, 1.0, 1.0, ZoneKind::Obstacle));
            }
        }
    }
    zones
}

/// Random grid from a seed.
pub fn random_grid(seed: u64, size: usize, density: f64) -> OccupancyGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let zones = random_zones(&mut rng, size, density);
    let frame = GridFrame::new(size as f32, size as f32, 1.0).unwrap();
    OccupancyGrid::build(frame, &zones, 0.0)
}

/// Pick a random free cell, if the grid has any.
pub fn random_free_cell(rng: &mut StdRng, grid: &OccupancyGrid) -> Option<GridCoord> {
    let free: Vec<GridCoord> = (0..grid.height() as i32)
        .flat_map(|y| (0..grid.width() as i32).map(move |x| GridCoord::new(x, y)))
        .filter(|&c| grid.is_free(c))
        .collect();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

/// Shortest 4-connected move count by breadth-first search.
pub fn bfs_distance(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> Option<u32> {
    if !grid.is_free(start) || !grid.is_free(goal) {
        return None;
    }

    let width = grid.width();
    let index = |c: GridCoord| c.y as usize * width + c.x as usize;
    let mut dist = vec![u32::MAX; width * grid.height()];
    let mut queue = VecDeque::new();
    dist[index(start)] = 0;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(dist[index(current)]);
        }
        for next in current.neighbors_4() {
            if grid.is_free(next) && dist[index(next)] == u32::MAX {
                dist[index(next)] = dist[index(current)] + 1;
                queue.push_back(next);
            }
        }
    }
    None
}

/// Check a cell path is a connected chain of free cells.
pub fn assert_sound_path(grid: &OccupancyGrid, path: &[GridCoord]) {
    for c in path {
        assert!(grid.is_free(*c), "path crosses blocked cell {:?}", c);
    }
    for w in path.windows(2) {
        assert_eq!(
            w[0].manhattan_distance(&w[1]),
            1,
            "path jumps from {:?} to {:?}",
            w[0],
            w[1]
        );
    }
}

/// Positions every `step` units along a polyline, ending on its last point.
pub fn drive_along(points: &[PlanPoint], step: f32) -> Vec<PlanPoint> {
    let mut positions = Vec::new();
    let Some(&first) = points.first() else {
        return positions;
    };

    positions.push(first);
    for w in points.windows(2) {
        let length = w[0].distance(&w[1]);
        let steps = (length / step).ceil().max(1.0) as usize;
        for i in 1..=steps {
            positions.push(w[0].lerp(&w[1], i as f32 / steps as f32));
        }
    }
    positions
}
