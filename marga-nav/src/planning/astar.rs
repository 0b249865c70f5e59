//! A* search on the occupancy grid.
//!
//! 4-connected moves with uniform cost and a Manhattan heuristic, which is
//! consistent on this grid, so the first time the goal is popped its cost is
//! optimal. Costs are integers and ties on `f` are broken by insertion order
//! (first pushed, first popped), so the same grid, start and goal always
//! yield the same path.

use log::{debug, trace};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::GridCoord;
use crate::grid::OccupancyGrid;

/// A node in the open set
#[derive(Clone, Copy, Debug)]
struct AStarNode {
    coord: GridCoord,
    g_cost: u32, // Cost from start
    f_cost: u32, // g_cost + heuristic
    seq: u64,    // Push order
}

impl Eq for AStarNode {}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* configuration
#[derive(Clone, Debug, PartialEq)]
pub struct AStarConfig {
    /// Maximum number of nodes to expand before giving up
    pub max_iterations: usize,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
        }
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PathFailure {
    /// Start or goal is out of bounds
    OutOfBounds,
    /// Start cell is blocked
    StartBlocked,
    /// Goal cell is blocked
    GoalBlocked,
    /// Open set exhausted without reaching the goal
    NoPath,
    /// Maximum iterations exceeded
    MaxIterationsExceeded,
}

/// Result of an A* search
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    /// Cells from start to goal inclusive (empty if no path found)
    pub path: Vec<GridCoord>,
    /// Number of moves (path length minus one)
    pub cost: u32,
    /// Number of nodes expanded during search
    pub nodes_expanded: usize,
    /// Whether a path was found
    pub success: bool,
    /// Reason for failure (if any)
    pub failure_reason: Option<PathFailure>,
}

impl PathResult {
    fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            cost: u32::MAX,
            nodes_expanded,
            success: false,
            failure_reason: Some(reason),
        }
    }

    /// Path length in cells
    pub fn length_cells(&self) -> usize {
        self.path.len()
    }

    /// The path, or `None` on failure
    pub fn into_path(self) -> Option<Vec<GridCoord>> {
        if self.success { Some(self.path) } else { None }
    }
}

/// A* pathfinder over an occupancy grid
pub struct AStarPlanner<'a> {
    grid: &'a OccupancyGrid,
    config: AStarConfig,
}

impl<'a> AStarPlanner<'a> {
    /// Create a new A* planner
    pub fn new(grid: &'a OccupancyGrid, config: AStarConfig) -> Self {
        Self { grid, config }
    }

    /// Create with default configuration
    pub fn with_defaults(grid: &'a OccupancyGrid) -> Self {
        Self::new(grid, AStarConfig::default())
    }

    /// Find a minimum-length 4-connected path from start to goal.
    pub fn find_path(&self, start: GridCoord, goal: GridCoord) -> PathResult {
        trace!(
            "[AStar] find_path: start=({},{}) goal=({},{})",
            start.x, start.y, goal.x, goal.y
        );

        let frame = self.grid.frame();
        let (Some(start_idx), Some(goal_idx)) = (frame.index(start), frame.index(goal)) else {
            debug!("[AStar] FAILED: OutOfBounds - start or goal outside grid");
            return PathResult::failed(PathFailure::OutOfBounds, 0);
        };
        if self.grid.is_blocked(start) {
            debug!("[AStar] FAILED: StartBlocked at ({},{})", start.x, start.y);
            return PathResult::failed(PathFailure::StartBlocked, 0);
        }
        if self.grid.is_blocked(goal) {
            debug!("[AStar] FAILED: GoalBlocked at ({},{})", goal.x, goal.y);
            return PathResult::failed(PathFailure::GoalBlocked, 0);
        }

        let cells = frame.cell_count();
        let mut g_scores = vec![u32::MAX; cells];
        let mut came_from = vec![usize::MAX; cells];
        let mut closed = vec![false; cells];
        let mut open_set = BinaryHeap::new();
        let mut seq = 0u64;

        g_scores[start_idx] = 0;
        open_set.push(AStarNode {
            coord: start,
            g_cost: 0,
            f_cost: heuristic(start, goal),
            seq,
        });

        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop() {
            let Some(current_idx) = frame.index(current.coord) else {
                continue;
            };
            if closed[current_idx] {
                continue;
            }

            // Goal reached
            if current_idx == goal_idx {
                return self.reconstruct_path(&came_from, goal_idx, current.g_cost, nodes_expanded);
            }

            closed[current_idx] = true;
            nodes_expanded += 1;
            if nodes_expanded > self.config.max_iterations {
                debug!(
                    "[AStar] FAILED: MaxIterationsExceeded ({} nodes)",
                    nodes_expanded
                );
                return PathResult::failed(PathFailure::MaxIterationsExceeded, nodes_expanded);
            }

            for neighbor in current.coord.neighbors_4() {
                let Some(neighbor_idx) = frame.index(neighbor) else {
                    continue;
                };
                if closed[neighbor_idx] || self.grid.is_blocked(neighbor) {
                    continue;
                }

                let tentative_g = current.g_cost + 1;
                if tentative_g < g_scores[neighbor_idx] {
                    g_scores[neighbor_idx] = tentative_g;
                    came_from[neighbor_idx] = current_idx;
                    seq += 1;
                    open_set.push(AStarNode {
                        coord: neighbor,
                        g_cost: tentative_g,
                        f_cost: tentative_g + heuristic(neighbor, goal),
                        seq,
                    });
                }
            }
        }

        debug!(
            "[AStar] FAILED: NoPath after expanding {} nodes",
            nodes_expanded
        );
        PathResult::failed(PathFailure::NoPath, nodes_expanded)
    }

    /// Walk parent pointers back from the goal
    fn reconstruct_path(
        &self,
        came_from: &[usize],
        goal_idx: usize,
        cost: u32,
        nodes_expanded: usize,
    ) -> PathResult {
        let frame = self.grid.frame();
        let mut path = Vec::with_capacity(cost as usize + 1);
        let mut current = goal_idx;

        path.push(frame.coord_of(current));
        while came_from[current] != usize::MAX {
            current = came_from[current];
            path.push(frame.coord_of(current));
        }
        path.reverse();

        trace!(
            "[AStar] SUCCESS: path length={} cells, cost={}, nodes_expanded={}",
            path.len(),
            cost,
            nodes_expanded
        );

        PathResult {
            path,
            cost,
            nodes_expanded,
            success: true,
            failure_reason: None,
        }
    }
}

/// Manhattan distance heuristic
#[inline]
fn heuristic(from: GridCoord, to: GridCoord) -> u32 {
    from.manhattan_distance(&to) as u32
}

/// Quick path finding with default configuration
pub fn find_path(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> Option<Vec<GridCoord>> {
    AStarPlanner::with_defaults(grid)
        .find_path(start, goal)
        .into_path()
}

/// Check if a path exists
pub fn path_exists(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> bool {
    AStarPlanner::with_defaults(grid)
        .find_path(start, goal)
        .success
}
