//! Lazy PRM: defer edge collision checks until a query wants the edge.

use std::time::Instant;

use log::{debug, trace};
use rand::Rng;

use crate::config::RoadmapConfig;
use crate::core::GridCoord;
use crate::geometry::line_of_sight;
use crate::grid::OccupancyGrid;
use crate::planning::{PlanFailure, PlanResult};
use crate::visualization::VisualizationHook;

use super::{
    EdgeState, Neighborhood, Roadmap, Sampler, connect_nodes, sample_nodes, shortest_path,
    waypoints,
};

/// Lazy PRM planner.
///
/// The roadmap is built without checking any edge. Each query round runs
/// Dijkstra over the edges not yet known to be blocked, then walks the
/// candidate path checking unchecked edges in order. The first blocked edge
/// is retired and the search repeats, up to `max_retries` rounds.
#[derive(Clone, Debug)]
pub struct LazyPrm {
    config: RoadmapConfig,
}

impl LazyPrm {
    pub fn new(config: RoadmapConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(RoadmapConfig::default())
    }

    pub fn config(&self) -> &RoadmapConfig {
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
        trace!("[LazyPrm] plan: start={} goal={}", start, goal);

        let mut roadmap = Roadmap::new(start, goal);
        sample_nodes(
            "LazyPrm",
            &mut roadmap,
            grid,
            &Sampler::Uniform,
            self.config.num_samples,
            rng,
        );
        connect_nodes(
            &mut roadmap,
            grid,
            Neighborhood::Nearest {
                radius: self.config.connection_radius,
                max_neighbors: self.config.max_neighbors,
            },
            false,
            hook,
        );

        match query(&mut roadmap, grid, self.config.max_retries) {
            Ok(path) => {
                debug!(
                    "[LazyPrm] path over {} of {} nodes ({} edges)",
                    path.len(),
                    roadmap.len(),
                    roadmap.edge_count()
                );
                PlanResult::solved(waypoints(&roadmap, &path), started, roadmap.len())
            }
            Err(reason) => {
                debug!(
                    "[LazyPrm] FAILED: {:?} in roadmap of {} nodes, {} edges",
                    reason,
                    roadmap.len(),
                    roadmap.edge_count()
                );
                PlanResult::failed(reason, started)
            }
        }
    }
}

/// Search/validate loop. Returns the accepted node path.
fn query(
    roadmap: &mut Roadmap,
    grid: &OccupancyGrid,
    max_retries: usize,
) -> Result<Vec<usize>, PlanFailure> {
    for round in 1..=max_retries {
        let Some(found) = shortest_path(roadmap, Roadmap::START, Roadmap::GOAL) else {
            return Err(PlanFailure::NoPath);
        };

        let blocked = found.path.windows(2).find(|pair| {
            let (a, b) = (pair[0], pair[1]);
            roadmap.edge_state(a, b) != Some(EdgeState::Valid)
                && !line_of_sight(grid, roadmap.node(a), roadmap.node(b))
        });

        match blocked {
            Some(pair) => {
                trace!(
                    "[LazyPrm] round {}: edge {} - {} blocked",
                    round,
                    roadmap.node(pair[0]),
                    roadmap.node(pair[1])
                );
                roadmap.set_state(pair[0], pair[1], EdgeState::Invalid);
            }
            None => {
                for pair in found.path.windows(2) {
                    roadmap.set_state(pair[0], pair[1], EdgeState::Valid);
                }
                return Ok(found.path);
            }
        }
    }
    Err(PlanFailure::RetriesExhausted)
}
