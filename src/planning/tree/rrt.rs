//! Basic RRT and its goal-biased variant.

use std::time::Instant;

use log::{debug, trace};
use rand::Rng;

use crate::config::TreeConfig;
use crate::core::GridCoord;
use crate::grid::OccupancyGrid;
use crate::planning::{PlanFailure, PlanResult};
use crate::visualization::VisualizationHook;

use super::{Extension, Tree, extend, path_with_goal, root_solution, sample_target};

/// Rapidly-exploring random tree.
///
/// Only the new node's cell is collision-checked, so the straight segment
/// between two nodes may clip an obstacle corner; the dense path follows
/// each segment's raster regardless.
#[derive(Clone, Debug)]
pub struct Rrt {
    config: TreeConfig,
}

impl Rrt {
    /// Create a new RRT planner with configuration.
    pub fn new(config: TreeConfig) -> Self {
        Self { config }
    }

    /// Create a new RRT planner with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TreeConfig::default())
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Plan a path from `start` to `goal`.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        grid: &OccupancyGrid,
        start: GridCoord,
        goal: GridCoord,
        rng: &mut R,
        hook: &mut VisualizationHook<'_>,
    ) -> PlanResult {
        grow(
            "Rrt",
            &self.config,
            self.config.goal_sample_rate,
            grid,
            start,
            goal,
            rng,
            hook,
        )
    }
}

/// RRT that samples the goal more often (`goal_biased_sample_rate`).
#[derive(Clone, Debug)]
pub struct GoalBiasedRrt {
    config: TreeConfig,
}

impl GoalBiasedRrt {
    pub fn new(config: TreeConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(TreeConfig::default())
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Plan a path from `start` to `goal`.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        grid: &OccupancyGrid,
        start: GridCoord,
        goal: GridCoord,
        rng: &mut R,
        hook: &mut VisualizationHook<'_>,
    ) -> PlanResult {
        grow(
            "GoalBiasedRrt",
            &self.config,
            self.config.goal_biased_sample_rate,
            grid,
            start,
            goal,
            rng,
            hook,
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn grow<R: Rng + ?Sized>(
    label: &str,
    config: &TreeConfig,
    goal_sample_rate: f64,
    grid: &OccupancyGrid,
    start: GridCoord,
    goal: GridCoord,
    rng: &mut R,
    hook: &mut VisualizationHook<'_>,
) -> PlanResult {
    let started = Instant::now();
    trace!("[{}] plan: start={} goal={}", label, start, goal);

    let mut tree = Tree::new(start);
    if let Some(waypoints) = root_solution(&tree, grid, goal, config.goal_tolerance) {
        debug!("[{}] start already within tolerance of goal", label);
        return PlanResult::solved(waypoints, started, 0);
    }

    for iteration in 1..=config.max_iter {
        let target = sample_target(grid, goal, goal_sample_rate, rng);
        let id = match extend(&mut tree, grid, target, config.step_size) {
            Extension::Advanced(id) | Extension::Reached(id) => id,
            Extension::Present(_) | Extension::Trapped => continue,
        };
        hook.emit_with(|| tree.edges());

        let point = tree.point(id);
        if point.distance(&goal) <= config.goal_tolerance {
            let waypoints = path_with_goal(&tree, id, goal);
            debug!(
                "[{}] solved at iteration {} with {} nodes, {} waypoints",
                label,
                iteration,
                tree.len(),
                waypoints.len()
            );
            return PlanResult::solved(waypoints, started, iteration);
        }
    }

    debug!(
        "[{}] FAILED: IterationLimit after {} iterations ({} nodes)",
        label,
        config.max_iter,
        tree.len()
    );
    PlanResult::failed(PlanFailure::IterationLimit, started)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;
    use crate::path::is_contiguous;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rrt_open_grid() {
        let grid = OccupancyGrid::new(10);
        let config = TreeConfig::default()
            .with_max_iter(2000)
            .with_goal_sample_rate(0.2);
        let planner = Rrt::new(config);
        let mut rng = StdRng::seed_from_u64(42);

        let result = planner.plan(
            &grid,
            GridCoord::new(0, 0),
            GridCoord::new(9, 9),
            &mut rng,
            &mut VisualizationHook::disabled(),
        );

        assert!(result.success());
        assert_eq!(result.path.first(), Some(&GridCoord::new(0, 0)));
        assert_eq!(result.path.last(), Some(&GridCoord::new(9, 9)));
        assert!(is_contiguous(&result.path));
        assert!(result.iterations.is_some());
    }

    #[test]
    fn test_rrt_walled_off_goal_fails() {
        let mut grid = OccupancyGrid::new(10);
        grid.fill_rect(GridCoord::new(5, 0), GridCoord::new(5, 9), CellState::Obstacle);
        let planner = Rrt::new(TreeConfig::default().with_max_iter(300));
        let mut rng = StdRng::seed_from_u64(1);

        let result = planner.plan(
            &grid,
            GridCoord::new(1, 1),
            GridCoord::new(8, 8),
            &mut rng,
            &mut VisualizationHook::disabled(),
        );

        assert!(!result.success());
        assert_eq!(result.failure, Some(PlanFailure::IterationLimit));
        assert_eq!(result.iterations, None);
    }

    #[test]
    fn test_start_within_tolerance_of_goal() {
        let grid = OccupancyGrid::new(5);
        let planner = GoalBiasedRrt::with_defaults();
        let mut rng = StdRng::seed_from_u64(9);

        let result = planner.plan(
            &grid,
            GridCoord::new(2, 2),
            GridCoord::new(3, 3),
            &mut rng,
            &mut VisualizationHook::disabled(),
        );

        assert!(result.success());
        assert_eq!(result.path.last(), Some(&GridCoord::new(3, 3)));
        assert!(is_contiguous(&result.path));
    }

    #[test]
    fn test_goal_biased_uses_its_own_rate() {
        // With the biased rate forced to 1.0 every sample is the goal, so the
        // tree marches straight there.
        let grid = OccupancyGrid::new(20);
        let config = TreeConfig {
            goal_sample_rate: 0.0,
            goal_biased_sample_rate: 1.0,
            ..Default::default()
        };
        let planner = GoalBiasedRrt::new(config);
        let mut rng = StdRng::seed_from_u64(0);

        let result = planner.plan(
            &grid,
            GridCoord::new(0, 0),
            GridCoord::new(15, 0),
            &mut rng,
            &mut VisualizationHook::disabled(),
        );

        assert_eq!(result.iterations, Some(14));
        assert_eq!(result.path.len(), 16);
    }
}
