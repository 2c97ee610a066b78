//! Roadmap planners (PRM family).
//!
//! Every variant builds a graph over free cells in two phases and then
//! queries it with Dijkstra:
//!
//! 1. **Sampling**: start and goal, then up to `num_samples` distinct free
//!    cells drawn by a [`Sampler`]. Sampling gives up after
//!    `3 × num_samples` attempts; a sparser roadmap is not an error.
//! 2. **Connection**: each node is linked to a candidate set of neighbors.
//!    Edges are collision-checked now, or (Lazy PRM) only when a query
//!    wants to use them.

mod dijkstra;
mod graph;
mod lazy;
mod prm;
mod sampler;

pub use dijkstra::{DijkstraResult, shortest_path};
pub use graph::{EdgeState, Roadmap, RoadmapEdge};
pub use lazy::LazyPrm;
pub use prm::{BridgePrm, GaussianPrm, Prm, PrmStar};
pub use sampler::Sampler;

use std::f32::consts::PI;

use log::debug;
use rand::Rng;

use crate::core::GridCoord;
use crate::geometry::line_of_sight;
use crate::grid::OccupancyGrid;
use crate::visualization::VisualizationHook;

/// Sampling attempts allowed per requested sample.
const ATTEMPTS_PER_SAMPLE: usize = 3;

/// Which nodes a node tries to connect to.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Neighborhood {
    /// Up to `max_neighbors` closest nodes within `radius`
    Nearest { radius: f32, max_neighbors: usize },
    /// Every node within the radius
    Radius(f32),
}

/// Fill `roadmap` with up to `num_samples` distinct free cells.
fn sample_nodes<R: Rng + ?Sized>(
    label: &str,
    roadmap: &mut Roadmap,
    grid: &OccupancyGrid,
    sampler: &Sampler,
    num_samples: usize,
    rng: &mut R,
) {
    let wanted = num_samples + 2;
    let max_attempts = num_samples * ATTEMPTS_PER_SAMPLE;
    let mut attempts = 0;

    while roadmap.len() < wanted && attempts < max_attempts {
        attempts += 1;
        if let Some(point) = sampler.sample(grid, rng)
            && !roadmap.contains(point)
        {
            roadmap.add_node(point);
        }
    }

    if roadmap.len() < wanted {
        debug!(
            "[{}] sampling shortfall: {} of {} samples after {} attempts",
            label,
            roadmap.len() - 2,
            num_samples,
            attempts
        );
    }
}

/// Link every node to its candidate neighbors.
///
/// With `check` set only edges with line of sight are added (as Valid);
/// otherwise every candidate edge is added Unchecked.
fn connect_nodes(
    roadmap: &mut Roadmap,
    grid: &OccupancyGrid,
    neighborhood: Neighborhood,
    check: bool,
    hook: &mut VisualizationHook<'_>,
) {
    for i in 0..roadmap.len() {
        let candidates = match neighborhood {
            Neighborhood::Nearest {
                radius,
                max_neighbors,
            } => {
                let mut found = roadmap.within_radius(i, radius);
                found.truncate(max_neighbors);
                found
            }
            Neighborhood::Radius(radius) => roadmap.within_radius(i, radius),
        };

        for (j, _) in candidates {
            if roadmap.has_edge(i, j) {
                continue;
            }
            let state = if !check {
                EdgeState::Unchecked
            } else if line_of_sight(grid, roadmap.node(i), roadmap.node(j)) {
                EdgeState::Valid
            } else {
                continue;
            };
            roadmap.add_edge(i, j, state);
            hook.emit(roadmap.lines());
        }
    }
}

/// PRM* connection radius for `n` nodes on `grid`, floored at `min_radius`.
///
/// `r(n) = γ · sqrt(ln n / n)` with `γ = 2 · sqrt(1.5) · sqrt(side / π)`.
fn star_radius(grid: &OccupancyGrid, n: usize, min_radius: f32) -> f32 {
    let side = grid.side_length();
    let gamma = 2.0 * 1.5f32.sqrt() * (side / PI).sqrt();
    let n = n.max(2) as f32;
    (gamma * (n.ln() / n).sqrt()).max(min_radius)
}

/// Cells of the roadmap path `path` (node indices).
fn waypoints(roadmap: &Roadmap, path: &[usize]) -> Vec<GridCoord> {
    path.iter().map(|&i| roadmap.node(i)).collect()
}
