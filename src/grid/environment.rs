//! Environment abstraction for planners that run while the world changes.
//!
//! Most planners borrow a plain [`OccupancyGrid`]. Dynamic RRT instead works
//! against an [`Environment`], which it advances once per prune cycle. The
//! planner itself never edits cells; changes come from the environment.

use log::debug;

use crate::core::{CellState, GridCoord};

use super::OccupancyGrid;

/// The grid as seen by a planner at a given iteration.
pub trait Environment {
    /// Current occupancy grid
    fn grid(&self) -> &OccupancyGrid;

    /// Called by the planner at the start of each prune cycle, before the
    /// tree is revalidated. Static environments do nothing.
    fn advance(&mut self, _iteration: usize) {}
}

impl Environment for OccupancyGrid {
    fn grid(&self) -> &OccupancyGrid {
        self
    }
}

impl Environment for &OccupancyGrid {
    fn grid(&self) -> &OccupancyGrid {
        self
    }
}

/// A single scheduled cell change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    /// Iteration at (or after) which the change becomes visible
    pub at_iteration: usize,
    /// Affected cell
    pub coord: GridCoord,
    /// New state
    pub state: CellState,
}

/// Environment that applies a script of cell changes as iterations pass.
///
/// Changes are applied in the `advance` call whose iteration is at or past
/// their `at_iteration`, so they only become visible at prune cycles.
#[derive(Clone, Debug)]
pub struct ScheduledEnvironment {
    grid: OccupancyGrid,
    pending: Vec<CellChange>,
    applied: usize,
}

impl ScheduledEnvironment {
    /// Create from an initial grid with no scheduled changes.
    pub fn new(grid: OccupancyGrid) -> Self {
        Self {
            grid,
            pending: Vec::new(),
            applied: 0,
        }
    }

    /// Schedule a cell change.
    pub fn schedule(mut self, at_iteration: usize, coord: GridCoord, state: CellState) -> Self {
        self.pending.push(CellChange {
            at_iteration,
            coord,
            state,
        });
        self
    }

    /// Schedule an obstacle on every cell of an inclusive rectangle.
    pub fn schedule_block(mut self, at_iteration: usize, min: GridCoord, max: GridCoord) -> Self {
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                self = self.schedule(at_iteration, GridCoord::new(x, y), CellState::Obstacle);
            }
        }
        self
    }

    /// Number of changes applied so far
    pub fn applied_count(&self) -> usize {
        self.applied
    }

    /// Number of changes still waiting
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Consume the environment and return the grid in its current state.
    pub fn into_grid(self) -> OccupancyGrid {
        self.grid
    }
}

impl Environment for ScheduledEnvironment {
    fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    fn advance(&mut self, iteration: usize) {
        let before = self.pending.len();
        let grid = &mut self.grid;
        self.pending.retain(|change| {
            if change.at_iteration <= iteration {
                grid.set(change.coord, change.state);
                false
            } else {
                true
            }
        });

        let applied_now = before - self.pending.len();
        if applied_now > 0 {
            self.applied += applied_now;
            debug!(
                "[Environment] iteration {}: applied {} cell changes",
                iteration, applied_now
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_grid_environment() {
        let mut grid = OccupancyGrid::new(4);
        Environment::advance(&mut grid, 100);
        assert_eq!(grid.grid().obstacle_count(), 0);
    }

    #[test]
    fn test_scheduled_changes_apply_in_order() {
        let mut env = ScheduledEnvironment::new(OccupancyGrid::new(8))
            .schedule(10, GridCoord::new(1, 1), CellState::Obstacle)
            .schedule(30, GridCoord::new(2, 2), CellState::Obstacle);

        env.advance(5);
        assert_eq!(env.applied_count(), 0);
        assert!(env.grid().is_free(GridCoord::new(1, 1)));

        env.advance(20);
        assert_eq!(env.applied_count(), 1);
        assert!(env.grid().is_blocked(GridCoord::new(1, 1)));
        assert!(env.grid().is_free(GridCoord::new(2, 2)));

        env.advance(30);
        assert_eq!(env.applied_count(), 2);
        assert_eq!(env.pending_count(), 0);
        assert!(env.into_grid().is_blocked(GridCoord::new(2, 2)));
    }

    #[test]
    fn test_schedule_block() {
        let mut env = ScheduledEnvironment::new(OccupancyGrid::new(8)).schedule_block(
            1,
            GridCoord::new(2, 2),
            GridCoord::new(3, 4),
        );
        assert_eq!(env.pending_count(), 6);
        env.advance(1);
        assert_eq!(env.grid().obstacle_count(), 6);
    }
}
