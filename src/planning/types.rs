//! Planner result types.

use std::time::{Duration, Instant};

use crate::core::GridCoord;
use crate::path::{densify, path_length};

/// Reason a planning call produced no path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanFailure {
    /// Iteration cap reached without connecting start and goal
    IterationLimit,
    /// The roadmap holds no route between start and goal
    NoPath,
    /// Lazy validation rejected a candidate path on every allowed round
    RetriesExhausted,
    /// The tree root stopped being valid after an environment change
    RootInvalidated,
}

/// Result of a planning call.
#[derive(Clone, Debug)]
pub struct PlanResult {
    /// Contiguous unit-step path from start to goal (empty on failure)
    pub path: Vec<GridCoord>,
    /// Sparse waypoints (tree nodes or roadmap vertices) the path follows
    pub waypoints: Vec<GridCoord>,
    /// Wall-clock time spent in the call
    pub elapsed: Duration,
    /// Iteration (tree planners) or roadmap node count (roadmap planners)
    /// at success; `None` on failure
    pub iterations: Option<usize>,
    /// Euclidean length of `waypoints` (`f32::INFINITY` on failure)
    pub cost: f32,
    /// Reason for failure (if any)
    pub failure: Option<PlanFailure>,
    /// RRT-Connect only: the start-tree and goal-tree nodes that were joined
    pub connection: Option<(GridCoord, GridCoord)>,
}

impl PlanResult {
    /// Successful result; the dense path is derived from `waypoints`.
    pub(crate) fn solved(waypoints: Vec<GridCoord>, started: Instant, iterations: usize) -> Self {
        Self {
            path: densify(&waypoints),
            cost: path_length(&waypoints),
            waypoints,
            elapsed: started.elapsed(),
            iterations: Some(iterations),
            failure: None,
            connection: None,
        }
    }

    /// Failed result with an empty path.
    pub(crate) fn failed(reason: PlanFailure, started: Instant) -> Self {
        Self {
            path: Vec::new(),
            waypoints: Vec::new(),
            elapsed: started.elapsed(),
            iterations: None,
            cost: f32::INFINITY,
            failure: Some(reason),
            connection: None,
        }
    }

    pub(crate) fn with_connection(mut self, start_side: GridCoord, goal_side: GridCoord) -> Self {
        self.connection = Some((start_side, goal_side));
        self
    }

    /// Whether a path was found
    #[inline]
    pub fn success(&self) -> bool {
        !self.path.is_empty()
    }

    /// Elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Path length in cells
    pub fn length_cells(&self) -> usize {
        self.path.len()
    }
}
