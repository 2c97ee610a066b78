//! Tree-growing planners (RRT family).
//!
//! All variants share the same growth step: sample a target, find the
//! nearest live node, steer a fixed step towards the target and keep the new
//! cell if it is free. They differ in how parents are chosen, how many trees
//! grow and when the loop stops.
//!
//! | Planner | Trees | Segment check | Stops |
//! |---------|-------|---------------|-------|
//! | [`Rrt`] / [`GoalBiasedRrt`] | 1 | none | first node near goal |
//! | [`RrtStar`] | 1 | line of sight + rewire | first node near goal with sight |
//! | [`RrtConnect`] | 2 | none | trees meet |
//! | [`DynamicRrt`] | 1 | periodic prune | first node near goal with sight |
//! | [`InformedRrtStar`] | 1 | as RRT* | after `max_iter` |

mod arena;
mod connect;
mod dynamic;
mod informed;
mod rrt;
mod rrt_star;

pub use arena::{NodeId, PruneReport, Tree, TreeNode};
pub use connect::RrtConnect;
pub use dynamic::DynamicRrt;
pub use informed::InformedRrtStar;
pub use rrt::{GoalBiasedRrt, Rrt};
pub use rrt_star::RrtStar;

use rand::Rng;

use crate::core::GridCoord;
use crate::geometry::{line_of_sight, steer};
use crate::grid::OccupancyGrid;

/// Goal with probability `goal_sample_rate`, otherwise a uniform cell.
fn sample_target<R: Rng + ?Sized>(
    grid: &OccupancyGrid,
    goal: GridCoord,
    goal_sample_rate: f64,
    rng: &mut R,
) -> GridCoord {
    if rng.random::<f64>() < goal_sample_rate {
        goal
    } else {
        grid.random_coord(rng)
    }
}

/// Outcome of a single extension step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Extension {
    /// A new node was added short of the target
    Advanced(NodeId),
    /// A new node was added on the target
    Reached(NodeId),
    /// The target already was the nearest node; nothing was added
    Present(NodeId),
    /// The step left the grid or hit an obstacle
    Trapped,
}

/// Grow `tree` one step towards `target`.
///
/// Only the endpoint of the step is checked; the segment itself is not.
fn extend(tree: &mut Tree, grid: &OccupancyGrid, target: GridCoord, step_size: f32) -> Extension {
    let Some(nearest) = tree.nearest(target) else {
        return Extension::Trapped;
    };
    let from = tree.point(nearest);
    let Some(step) = steer(from, target, step_size) else {
        return Extension::Present(nearest);
    };
    if !grid.is_free(step) {
        return Extension::Trapped;
    }

    let id = tree.add(step, nearest, tree.cost(nearest) + from.distance(&step));
    if step == target {
        Extension::Reached(id)
    } else {
        Extension::Advanced(id)
    }
}

/// Root-to-node path with `goal` appended unless the node already sits on it.
fn path_with_goal(tree: &Tree, id: NodeId, goal: GridCoord) -> Vec<GridCoord> {
    let mut waypoints = tree.path_to_root(id);
    if tree.point(id) != goal {
        waypoints.push(goal);
    }
    waypoints
}

/// Waypoints when the root already passes the goal test, before any growth.
fn root_solution(
    tree: &Tree,
    grid: &OccupancyGrid,
    goal: GridCoord,
    tolerance: f32,
) -> Option<Vec<GridCoord>> {
    let root = tree.root_point();
    (root.distance(&goal) <= tolerance && line_of_sight(grid, root, goal))
        .then(|| path_with_goal(tree, Tree::ROOT, goal))
}
