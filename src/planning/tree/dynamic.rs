//! Dynamic RRT: RRT that periodically prunes nodes invalidated by a
//! changing environment and keeps growing from what is left.

use std::time::Instant;

use log::{debug, trace};
use rand::Rng;

use crate::config::TreeConfig;
use crate::core::GridCoord;
use crate::geometry::line_of_sight;
use crate::grid::{Environment, OccupancyGrid};
use crate::planning::{PlanFailure, PlanResult};
use crate::visualization::VisualizationHook;

use super::{Extension, Tree, extend, path_with_goal, root_solution, sample_target};

/// Dynamic RRT planner.
#[derive(Clone, Debug)]
pub struct DynamicRrt {
    config: TreeConfig,
}

impl DynamicRrt {
    pub fn new(config: TreeConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(TreeConfig::default())
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Plan on a static grid. Prune cycles still run but find nothing to
    /// remove.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        grid: &OccupancyGrid,
        start: GridCoord,
        goal: GridCoord,
        rng: &mut R,
        hook: &mut VisualizationHook<'_>,
    ) -> PlanResult {
        let mut env = grid;
        self.plan_in(&mut env, start, goal, rng, hook)
    }

    /// Plan against an environment that may change between prune cycles.
    ///
    /// Every `replan_frequency` iterations the environment is advanced and
    /// every live node is revalidated against the new grid. Removing the
    /// root ends the call with [`PlanFailure::RootInvalidated`]. A
    /// `replan_frequency` of zero never prunes.
    pub fn plan_in<E, R>(
        &self,
        env: &mut E,
        start: GridCoord,
        goal: GridCoord,
        rng: &mut R,
        hook: &mut VisualizationHook<'_>,
    ) -> PlanResult
    where
        E: Environment + ?Sized,
        R: Rng + ?Sized,
    {
        let started = Instant::now();
        trace!("[DynamicRrt] plan: start={} goal={}", start, goal);

        let mut tree = Tree::new(start);
        if let Some(waypoints) =
            root_solution(&tree, env.grid(), goal, self.config.goal_tolerance)
        {
            debug!("[DynamicRrt] start already within tolerance of goal");
            return PlanResult::solved(waypoints, started, 0);
        }
        let mut pruned_total = 0usize;
        let frequency = self.config.replan_frequency;

        for iteration in 1..=self.config.max_iter {
            if frequency > 0 && iteration % frequency == 0 {
                env.advance(iteration);
                let report = tree.prune_invalid(env.grid());
                if report.root_removed {
                    debug!(
                        "[DynamicRrt] FAILED: RootInvalidated at iteration {}",
                        iteration
                    );
                    return PlanResult::failed(PlanFailure::RootInvalidated, started);
                }
                if report.removed > 0 {
                    pruned_total += report.removed;
                    trace!(
                        "[DynamicRrt] iteration {}: pruned {} nodes, {} remain",
                        iteration,
                        report.removed,
                        tree.len()
                    );
                    hook.emit_with(|| tree.edges());
                }
            }

            let grid = env.grid();
            let target = sample_target(grid, goal, self.config.goal_sample_rate, rng);
            let id = match extend(&mut tree, grid, target, self.config.step_size) {
                Extension::Advanced(id) | Extension::Reached(id) => id,
                Extension::Present(_) | Extension::Trapped => continue,
            };
            hook.emit_with(|| tree.edges());

            let point = tree.point(id);
            if point.distance(&goal) <= self.config.goal_tolerance
                && line_of_sight(grid, point, goal)
            {
                let waypoints = path_with_goal(&tree, id, goal);
                debug!(
                    "[DynamicRrt] solved at iteration {} with {} nodes ({} pruned)",
                    iteration,
                    tree.len(),
                    pruned_total
                );
                return PlanResult::solved(waypoints, started, iteration);
            }
        }

        debug!(
            "[DynamicRrt] FAILED: IterationLimit after {} iterations ({} pruned)",
            self.config.max_iter, pruned_total
        );
        PlanResult::failed(PlanFailure::IterationLimit, started)
    }
}
