//! RRT*: cost-aware RRT with parent selection and local rewiring.

use std::time::Instant;

use log::{debug, trace};
use rand::Rng;

use crate::config::TreeConfig;
use crate::core::GridCoord;
use crate::geometry::{line_of_sight, steer};
use crate::grid::OccupancyGrid;
use crate::planning::{PlanFailure, PlanResult};
use crate::visualization::VisualizationHook;

use super::{NodeId, Tree, path_with_goal, root_solution, sample_target};

/// Minimum improvement for a rewire to count.
const REWIRE_EPSILON: f32 = 1e-6;

/// RRT* planner.
///
/// Returns the first solution found; use [`super::InformedRrtStar`] to keep
/// improving it.
#[derive(Clone, Debug)]
pub struct RrtStar {
    config: TreeConfig,
}

impl RrtStar {
    /// Create a new RRT* planner with configuration.
    pub fn new(config: TreeConfig) -> Self {
        Self { config }
    }

    /// Create a new RRT* planner with default configuration.
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
        let started = Instant::now();
        trace!("[RrtStar] plan: start={} goal={}", start, goal);

        let mut tree = Tree::new(start);
        if let Some(waypoints) = root_solution(&tree, grid, goal, self.config.goal_tolerance) {
            debug!("[RrtStar] start already within tolerance of goal");
            return PlanResult::solved(waypoints, started, 0);
        }
        let mut rewired = 0usize;

        for iteration in 1..=self.config.max_iter {
            let target = sample_target(grid, goal, self.config.goal_sample_rate, rng);
            let Some(insertion) = insert_with_rewire(&mut tree, grid, target, &self.config) else {
                continue;
            };
            rewired += insertion.rewired;
            hook.emit_with(|| tree.edges());

            let point = tree.point(insertion.id);
            if point.distance(&goal) <= self.config.goal_tolerance
                && line_of_sight(grid, point, goal)
            {
                let waypoints = path_with_goal(&tree, insertion.id, goal);
                debug!(
                    "[RrtStar] solved at iteration {} with {} nodes ({} rewires), cost {:.2}",
                    iteration,
                    tree.len(),
                    rewired,
                    tree.cost(insertion.id) + point.distance(&goal)
                );
                return PlanResult::solved(waypoints, started, iteration);
            }
        }

        debug!(
            "[RrtStar] FAILED: IterationLimit after {} iterations ({} nodes)",
            self.config.max_iter,
            tree.len()
        );
        PlanResult::failed(PlanFailure::IterationLimit, started)
    }
}

/// A node added by [`insert_with_rewire`].
pub(super) struct Insertion {
    pub id: NodeId,
    pub rewired: usize,
}

/// One RRT* growth step: steer towards `target`, pick the cheapest visible
/// parent among the neighbors, insert, then rewire those neighbors through
/// the new node.
///
/// Returns `None` when the step is rejected.
pub(super) fn insert_with_rewire(
    tree: &mut Tree,
    grid: &OccupancyGrid,
    target: GridCoord,
    config: &TreeConfig,
) -> Option<Insertion> {
    let nearest = tree.nearest(target)?;
    let nearest_point = tree.point(nearest);
    let step = steer(nearest_point, target, config.step_size)?;
    if !grid.is_free(step) || !line_of_sight(grid, nearest_point, step) {
        return None;
    }

    // Neighborhood is taken before the new node exists
    let near = tree.within_radius(step, config.rewire_radius);

    let mut parent = nearest;
    let mut min_cost = tree.cost(nearest) + nearest_point.distance(&step);
    for &candidate in &near {
        let candidate_point = tree.point(candidate);
        let cost = tree.cost(candidate) + candidate_point.distance(&step);
        if cost < min_cost && line_of_sight(grid, candidate_point, step) {
            parent = candidate;
            min_cost = cost;
        }
    }

    let id = tree.add(step, parent, min_cost);
    let rewired = rewire(tree, grid, id, parent, &near);
    Some(Insertion { id, rewired })
}

/// Re-parent each neighbor to `id` when that is strictly cheaper.
///
/// Only the neighbor's own cost is updated; its descendants keep theirs.
fn rewire(
    tree: &mut Tree,
    grid: &OccupancyGrid,
    id: NodeId,
    parent: NodeId,
    near: &[NodeId],
) -> usize {
    let point = tree.point(id);
    let base = tree.cost(id);
    let mut count = 0;

    for &neighbor in near {
        if neighbor == parent {
            continue;
        }
        let neighbor_point = tree.point(neighbor);
        let new_cost = base + point.distance(&neighbor_point);
        if new_cost + REWIRE_EPSILON < tree.cost(neighbor)
            && line_of_sight(grid, point, neighbor_point)
        {
            tree.set_parent(neighbor, id, new_cost);
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;
    use crate::path::is_contiguous;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rrt_star_path_has_line_of_sight() {
        let mut grid = OccupancyGrid::new(20);
        grid.fill_rect(GridCoord::new(8, 0), GridCoord::new(9, 14), CellState::Obstacle);
        let planner = RrtStar::new(TreeConfig::default().with_max_iter(5000));
        let mut rng = StdRng::seed_from_u64(11);

        let result = planner.plan(
            &grid,
            GridCoord::new(2, 2),
            GridCoord::new(17, 2),
            &mut rng,
            &mut VisualizationHook::disabled(),
        );

        assert!(result.success());
        assert!(is_contiguous(&result.path));
        assert!(result.path.iter().all(|&c| grid.is_free(c)));
        for pair in result.waypoints.windows(2) {
            assert!(line_of_sight(&grid, pair[0], pair[1]));
        }
    }

    #[test]
    fn test_choose_parent_prefers_cheaper_neighbor() {
        let grid = OccupancyGrid::new(10);
        // Root at (0,0); a long detour node at (2,0) with inflated cost
        let mut tree = Tree::new(GridCoord::new(0, 0));
        let detour = tree.add(GridCoord::new(2, 0), Tree::ROOT, 10.0);
        let config = TreeConfig {
            rewire_radius: 3.0,
            step_size: 1.0,
            ..Default::default()
        };

        // Nearest to (3,0) is the detour node, but the root is cheaper
        let insertion = insert_with_rewire(&mut tree, &grid, GridCoord::new(3, 0), &config)
            .unwrap();
        assert_eq!(tree.point(insertion.id), GridCoord::new(3, 0));
        assert_eq!(tree.node(insertion.id).parent, Some(Tree::ROOT));
        assert_relative_eq!(tree.cost(insertion.id), 3.0);

        // The detour node is rewired through the new node (3 + 1 < 10)
        assert_eq!(insertion.rewired, 1);
        assert_eq!(tree.node(detour).parent, Some(insertion.id));
        assert_relative_eq!(tree.cost(detour), 4.0);
    }

    #[test]
    fn test_rewire_respects_line_of_sight() {
        let config = TreeConfig {
            rewire_radius: 3.0,
            ..Default::default()
        };
        let build = || {
            let mut tree = Tree::new(GridCoord::new(0, 0));
            tree.add(GridCoord::new(2, 2), Tree::ROOT, 50.0);
            tree
        };

        // Raster (1,0) -> (2,2) passes through (2,1)
        let mut blocked = OccupancyGrid::new(10);
        blocked.set(GridCoord::new(2, 1), CellState::Obstacle);
        let mut tree = build();
        let insertion =
            insert_with_rewire(&mut tree, &blocked, GridCoord::new(1, 0), &config).unwrap();
        assert_eq!(insertion.rewired, 0);
        assert_eq!(tree.node(1).parent, Some(Tree::ROOT));

        let open = OccupancyGrid::new(10);
        let mut tree = build();
        let insertion =
            insert_with_rewire(&mut tree, &open, GridCoord::new(1, 0), &config).unwrap();
        assert_eq!(insertion.rewired, 1);
        assert_eq!(tree.node(1).parent, Some(insertion.id));
        assert_relative_eq!(tree.cost(1), 1.0 + 5f32.sqrt());
    }

    #[test]
    fn test_rejects_step_into_obstacle() {
        let mut grid = OccupancyGrid::new(5);
        grid.set(GridCoord::new(1, 0), CellState::Obstacle);
        let mut tree = Tree::new(GridCoord::new(0, 0));
        let config = TreeConfig::default();

        assert!(insert_with_rewire(&mut tree, &grid, GridCoord::new(4, 0), &config).is_none());
        assert_eq!(tree.len(), 1);
    }
}
