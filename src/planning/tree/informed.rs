//! Informed RRT*: keeps refining after the first solution by sampling only
//! inside the ellipse of points that could still shorten it.

use std::f32::consts::TAU;
use std::time::Instant;

use log::{debug, trace};
use rand::Rng;

use crate::config::TreeConfig;
use crate::core::GridCoord;
use crate::geometry::line_of_sight;
use crate::grid::OccupancyGrid;
use crate::path::path_length;
use crate::planning::{PlanFailure, PlanResult};
use crate::visualization::VisualizationHook;

use super::rrt_star::insert_with_rewire;
use super::{NodeId, Tree, path_with_goal, root_solution, sample_target};

/// Informed RRT* planner.
///
/// Always runs `max_iter` iterations. The reported `iterations` is the
/// iteration at which the returned solution was last improved.
#[derive(Clone, Debug)]
pub struct InformedRrtStar {
    config: TreeConfig,
}

/// Prolate ellipse with foci at start and goal.
#[derive(Clone, Copy, Debug)]
struct InformedSet {
    center_x: f32,
    center_y: f32,
    cos_heading: f32,
    sin_heading: f32,
    c_min: f32,
}

impl InformedSet {
    fn new(start: GridCoord, goal: GridCoord) -> Self {
        let heading = ((goal.y - start.y) as f32).atan2((goal.x - start.x) as f32);
        Self {
            center_x: (start.x + goal.x) as f32 / 2.0,
            center_y: (start.y + goal.y) as f32 / 2.0,
            cos_heading: heading.cos(),
            sin_heading: heading.sin(),
            c_min: start.distance(&goal),
        }
    }

    /// Uniform sample from the ellipse whose major axis is `c_best`,
    /// rounded to the nearest cell.
    fn sample<R: Rng + ?Sized>(&self, c_best: f32, rng: &mut R) -> GridCoord {
        let a = c_best / 2.0;
        let b = (c_best * c_best - self.c_min * self.c_min).max(0.0).sqrt() / 2.0;

        let r = rng.random::<f32>().sqrt();
        let angle = rng.random_range(0.0..TAU);
        let x = a * r * angle.cos();
        let y = b * r * angle.sin();

        GridCoord::new(
            (x * self.cos_heading - y * self.sin_heading + self.center_x).round() as i32,
            (x * self.sin_heading + y * self.cos_heading + self.center_y).round() as i32,
        )
    }
}

impl InformedRrtStar {
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
        let started = Instant::now();
        trace!("[InformedRrtStar] plan: start={} goal={}", start, goal);

        let informed = InformedSet::new(start, goal);
        let mut tree = Tree::new(start);
        if let Some(waypoints) = root_solution(&tree, grid, goal, self.config.goal_tolerance) {
            debug!("[InformedRrtStar] start already within tolerance of goal");
            return PlanResult::solved(waypoints, started, 0);
        }

        let mut goal_node: Option<NodeId> = None;
        // Length of the path currently ending at the goal node. Stored costs
        // go stale below a rewired node, so this is measured on the path.
        let mut c_best = f32::INFINITY;
        let mut found_at = 0usize;
        let mut improvements = 0usize;

        for iteration in 1..=self.config.max_iter {
            let target = if c_best.is_finite() {
                informed.sample(c_best, rng)
            } else {
                sample_target(grid, goal, self.config.goal_sample_rate, rng)
            };
            if !grid.in_bounds(target) {
                continue;
            }

            let Some(insertion) = insert_with_rewire(&mut tree, grid, target, &self.config) else {
                continue;
            };

            // A rewire above the goal node may have shortened its path
            if let Some(g) = goal_node {
                let length = path_length(&tree.path_to_root(g));
                if length < c_best {
                    trace!(
                        "[InformedRrtStar] iteration {}: rewire shortened solution to {:.2}",
                        iteration, length
                    );
                    c_best = length;
                    found_at = iteration;
                    improvements += 1;
                }
            }

            let id = insertion.id;
            let point = tree.point(id);
            if point.distance(&goal) <= self.config.goal_tolerance
                && line_of_sight(grid, point, goal)
            {
                let through_new = path_length(&path_with_goal(&tree, id, goal));
                if through_new < c_best {
                    let stored_cost = tree.cost(id) + point.distance(&goal);
                    // Stored costs never shrink down a branch, so a
                    // cheaper stored cost also rules out `id` lying below `g`
                    let attached = match goal_node {
                        _ if point == goal => Some(id),
                        Some(g) if stored_cost < tree.cost(g) => {
                            tree.set_parent(g, id, stored_cost);
                            Some(g)
                        }
                        Some(_) => None,
                        None => Some(tree.add(goal, id, stored_cost)),
                    };
                    if let Some(g) = attached {
                        if found_at == 0 {
                            debug!(
                                "[InformedRrtStar] first solution at iteration {}, cost {:.2}",
                                iteration, through_new
                            );
                        }
                        goal_node = Some(g);
                        c_best = path_length(&tree.path_to_root(g));
                        found_at = iteration;
                        improvements += 1;
                    }
                }
            }

            hook.emit_with(|| tree.edges());
        }

        match goal_node {
            Some(g) => {
                let waypoints = tree.path_to_root(g);
                debug!(
                    "[InformedRrtStar] best cost {:.2} (c_min {:.2}) after {} improvements, last at iteration {}",
                    c_best, informed.c_min, improvements, found_at
                );
                PlanResult::solved(waypoints, started, found_at)
            }
            None => {
                debug!(
                    "[InformedRrtStar] FAILED: IterationLimit after {} iterations ({} nodes)",
                    self.config.max_iter,
                    tree.len()
                );
                PlanResult::failed(PlanFailure::IterationLimit, started)
            }
        }
    }
}
