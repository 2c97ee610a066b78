//! RRT-Connect: bidirectional tree growth.

use std::time::Instant;

use log::{debug, trace};
use rand::Rng;

use crate::config::TreeConfig;
use crate::core::{Edge, GridCoord};
use crate::grid::OccupancyGrid;
use crate::planning::{PlanFailure, PlanResult};
use crate::visualization::VisualizationHook;

use super::{Extension, NodeId, Tree, extend, root_solution};

/// Index of the tree rooted at the start.
const START_TREE: usize = 0;

/// RRT-Connect planner.
///
/// One tree grows from the start and one from the goal. Each iteration the
/// active tree extends towards a uniform sample and the other tree tries to
/// reach the new node; then the roles swap.
#[derive(Clone, Debug)]
pub struct RrtConnect {
    config: TreeConfig,
}

impl RrtConnect {
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
    ///
    /// On success [`PlanResult::connection`] holds the start-tree and
    /// goal-tree nodes that were joined.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        grid: &OccupancyGrid,
        start: GridCoord,
        goal: GridCoord,
        rng: &mut R,
        hook: &mut VisualizationHook<'_>,
    ) -> PlanResult {
        let started = Instant::now();
        trace!("[RrtConnect] plan: start={} goal={}", start, goal);

        let mut trees = [Tree::new(start), Tree::new(goal)];
        if let Some(waypoints) =
            root_solution(&trees[START_TREE], grid, goal, self.config.goal_tolerance)
        {
            debug!("[RrtConnect] start already within tolerance of goal");
            return PlanResult::solved(waypoints, started, 0).with_connection(start, goal);
        }
        let mut active = START_TREE;

        for iteration in 1..=self.config.max_iter {
            let passive = 1 - active;
            let sample = grid.random_coord(rng);

            let new_node = match extend(&mut trees[active], grid, sample, self.config.step_size) {
                Extension::Advanced(id) | Extension::Reached(id) => {
                    hook.emit_with(|| all_edges(&trees));
                    Some(id)
                }
                Extension::Present(id) => Some(id),
                Extension::Trapped => None,
            };

            if let Some(new_id) = new_node
                && let Some(other_id) = self.connect(&mut trees, passive, new_id, active, grid, hook)
            {
                let (start_id, goal_id) = if active == START_TREE {
                    (new_id, other_id)
                } else {
                    (other_id, new_id)
                };
                let [start_tree, goal_tree] = &trees;
                let waypoints = join_paths(start_tree, start_id, goal_tree, goal_id);
                debug!(
                    "[RrtConnect] connected at iteration {} ({} + {} nodes)",
                    iteration,
                    start_tree.len(),
                    goal_tree.len()
                );
                return PlanResult::solved(waypoints, started, iteration)
                    .with_connection(start_tree.point(start_id), goal_tree.point(goal_id));
            }

            active = passive;
        }

        debug!(
            "[RrtConnect] FAILED: IterationLimit after {} iterations ({} + {} nodes)",
            self.config.max_iter,
            trees[0].len(),
            trees[1].len()
        );
        PlanResult::failed(PlanFailure::IterationLimit, started)
    }

    /// Extend tree `passive` towards node `target_id` of tree `active`.
    ///
    /// Returns the passive-tree node that joins the two trees.
    fn connect(
        &self,
        trees: &mut [Tree; 2],
        passive: usize,
        target_id: NodeId,
        active: usize,
        grid: &OccupancyGrid,
        hook: &mut VisualizationHook<'_>,
    ) -> Option<NodeId> {
        let target = trees[active].point(target_id);

        for _ in 0..self.config.connect_attempts {
            match extend(&mut trees[passive], grid, target, self.config.step_size) {
                Extension::Trapped => return None,
                Extension::Present(id) => return Some(id),
                Extension::Reached(id) => {
                    hook.emit_with(|| all_edges(trees));
                    return Some(id);
                }
                Extension::Advanced(id) => {
                    hook.emit_with(|| all_edges(trees));
                    if trees[passive].point(id).distance(&target) <= self.config.goal_tolerance {
                        return Some(id);
                    }
                }
            }
        }
        None
    }
}

fn all_edges(trees: &[Tree; 2]) -> Vec<Edge> {
    let mut edges = trees[0].edges();
    edges.extend(trees[1].edges());
    edges
}

/// Start root → `start_id`, then `goal_id` → goal root.
fn join_paths(
    start_tree: &Tree,
    start_id: NodeId,
    goal_tree: &Tree,
    goal_id: NodeId,
) -> Vec<GridCoord> {
    let mut waypoints = start_tree.path_to_root(start_id);
    let mut tail = goal_tree.path_to_root(goal_id);
    tail.reverse();
    if waypoints.last() == tail.first() {
        tail.remove(0);
    }
    waypoints.extend(tail);
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;
    use crate::path::is_contiguous;
    use crate::visualization::EdgeRecorder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_join_paths_orientation() {
        let mut start_tree = Tree::new(GridCoord::new(0, 0));
        let a = start_tree.add(GridCoord::new(1, 0), Tree::ROOT, 1.0);
        let mut goal_tree = Tree::new(GridCoord::new(4, 0));
        let b = goal_tree.add(GridCoord::new(3, 0), Tree::ROOT, 1.0);
        let c = goal_tree.add(GridCoord::new(2, 0), b, 2.0);

        let joined = join_paths(&start_tree, a, &goal_tree, c);
        let xs: Vec<_> = joined.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_join_paths_shared_cell() {
        let mut start_tree = Tree::new(GridCoord::new(0, 0));
        let a = start_tree.add(GridCoord::new(1, 0), Tree::ROOT, 1.0);
        let mut goal_tree = Tree::new(GridCoord::new(2, 0));
        let b = goal_tree.add(GridCoord::new(1, 0), Tree::ROOT, 1.0);

        let joined = join_paths(&start_tree, a, &goal_tree, b);
        assert_eq!(joined.len(), 3);
    }

    #[test]
    fn test_connect_around_wall() {
        let mut grid = OccupancyGrid::new(15);
        grid.fill_rect(GridCoord::new(7, 0), GridCoord::new(7, 10), CellState::Obstacle);
        let planner = RrtConnect::new(TreeConfig::default().with_max_iter(5000));
        let mut rng = StdRng::seed_from_u64(5);
        let mut recorder = EdgeRecorder::new();

        let start = GridCoord::new(2, 2);
        let goal = GridCoord::new(12, 2);
        let result = planner.plan(
            &grid,
            start,
            goal,
            &mut rng,
            &mut VisualizationHook::new(true, &mut recorder),
        );

        assert!(result.success());
        assert_eq!(result.path.first(), Some(&start));
        assert_eq!(result.path.last(), Some(&goal));
        assert!(is_contiguous(&result.path));

        let (from_start, from_goal) = result.connection.unwrap();
        assert!(result.waypoints.contains(&from_start));
        assert!(result.waypoints.contains(&from_goal));
        assert!(recorder.frames() > 0);
    }
}
