//! Eagerly-checked PRM variants.

use std::time::Instant;

use log::{debug, trace};
use rand::Rng;

use crate::config::RoadmapConfig;
use crate::core::GridCoord;
use crate::grid::OccupancyGrid;
use crate::planning::{PlanFailure, PlanResult};
use crate::visualization::VisualizationHook;

use super::{
    Neighborhood, Roadmap, Sampler, connect_nodes, sample_nodes, shortest_path, star_radius,
    waypoints,
};

/// Build an eagerly-checked roadmap and run a single query on it.
#[allow(clippy::too_many_arguments)]
fn build_and_query<R: Rng + ?Sized>(
    label: &str,
    config: &RoadmapConfig,
    sampler: Sampler,
    star: bool,
    grid: &OccupancyGrid,
    start: GridCoord,
    goal: GridCoord,
    rng: &mut R,
    hook: &mut VisualizationHook<'_>,
) -> PlanResult {
    let started = Instant::now();
    trace!("[{}] plan: start={} goal={}", label, start, goal);

    let mut roadmap = Roadmap::new(start, goal);
    sample_nodes(label, &mut roadmap, grid, &sampler, config.num_samples, rng);

    let neighborhood = if star {
        let radius = star_radius(grid, roadmap.len(), config.min_star_radius);
        trace!("[{}] connection radius {:.2} for {} nodes", label, radius, roadmap.len());
        Neighborhood::Radius(radius)
    } else {
        Neighborhood::Nearest {
            radius: config.connection_radius,
            max_neighbors: config.max_neighbors,
        }
    };
    connect_nodes(&mut roadmap, grid, neighborhood, true, hook);

    match shortest_path(&roadmap, Roadmap::START, Roadmap::GOAL) {
        Some(found) => {
            debug!(
                "[{}] path over {} of {} nodes ({} edges), length {:.2}",
                label,
                found.path.len(),
                roadmap.len(),
                roadmap.edge_count(),
                found.distance
            );
            PlanResult::solved(waypoints(&roadmap, &found.path), started, roadmap.len())
        }
        None => {
            debug!(
                "[{}] FAILED: NoPath in roadmap of {} nodes, {} edges",
                label,
                roadmap.len(),
                roadmap.edge_count()
            );
            PlanResult::failed(PlanFailure::NoPath, started)
        }
    }
}

/// Probabilistic roadmap with k-nearest connection.
#[derive(Clone, Debug)]
pub struct Prm {
    config: RoadmapConfig,
}

impl Prm {
    /// Create a new PRM planner with configuration.
    pub fn new(config: RoadmapConfig) -> Self {
        Self { config }
    }

    /// Create a new PRM planner with default configuration.
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
        build_and_query(
            "Prm",
            &self.config,
            Sampler::Uniform,
            false,
            grid,
            start,
            goal,
            rng,
            hook,
        )
    }
}

/// PRM* : connects every pair within a radius that shrinks as the roadmap
/// grows.
#[derive(Clone, Debug)]
pub struct PrmStar {
    config: RoadmapConfig,
}

impl PrmStar {
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
        build_and_query(
            "PrmStar",
            &self.config,
            Sampler::Uniform,
            true,
            grid,
            start,
            goal,
            rng,
            hook,
        )
    }
}

/// PRM whose samples cluster along obstacle boundaries.
#[derive(Clone, Debug)]
pub struct GaussianPrm {
    config: RoadmapConfig,
}

impl GaussianPrm {
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
        let sampler = Sampler::Gaussian {
            sigma: self.config.gaussian_sigma,
            uniform_mix: self.config.uniform_mix,
        };
        build_and_query(
            "GaussianPrm",
            &self.config,
            sampler,
            false,
            grid,
            start,
            goal,
            rng,
            hook,
        )
    }
}

/// PRM whose samples concentrate in narrow passages (bridge test).
#[derive(Clone, Debug)]
pub struct BridgePrm {
    config: RoadmapConfig,
}

impl BridgePrm {
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
        let sampler = Sampler::Bridge {
            sigma: self.config.gaussian_sigma,
            uniform_mix: self.config.uniform_mix,
        };
        build_and_query(
            "BridgePrm",
            &self.config,
            sampler,
            false,
            grid,
            start,
            goal,
            rng,
            hook,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;
    use crate::geometry::line_of_sight;
    use crate::path::is_contiguous;
    use crate::visualization::EdgeRecorder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn walled() -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(30);
        grid.fill_rect(GridCoord::new(14, 0), GridCoord::new(15, 22), CellState::Obstacle);
        grid
    }

    fn assert_valid(grid: &OccupancyGrid, result: &PlanResult, start: GridCoord, goal: GridCoord) {
        assert!(result.success(), "no path: {:?}", result.failure);
        assert_eq!(result.path.first(), Some(&start));
        assert_eq!(result.path.last(), Some(&goal));
        assert!(is_contiguous(&result.path));
        assert!(result.path.iter().all(|&c| grid.is_free(c)));
        for pair in result.waypoints.windows(2) {
            assert!(line_of_sight(grid, pair[0], pair[1]));
        }
    }

    #[test]
    fn test_prm_around_wall() {
        let grid = walled();
        let planner = Prm::new(RoadmapConfig::default().with_num_samples(300));
        let mut rng = StdRng::seed_from_u64(12);
        let start = GridCoord::new(3, 3);
        let goal = GridCoord::new(26, 3);

        let result = planner.plan(&grid, start, goal, &mut rng, &mut VisualizationHook::disabled());
        assert_valid(&grid, &result, start, goal);
        assert_eq!(result.iterations, Some(302));
    }

    #[test]
    fn test_prm_star_around_wall() {
        let grid = walled();
        let planner = PrmStar::new(RoadmapConfig::default().with_num_samples(300));
        let mut rng = StdRng::seed_from_u64(13);
        let start = GridCoord::new(3, 3);
        let goal = GridCoord::new(26, 3);

        let result = planner.plan(&grid, start, goal, &mut rng, &mut VisualizationHook::disabled());
        assert_valid(&grid, &result, start, goal);
    }

    #[test]
    fn test_no_path_when_sealed() {
        let mut grid = OccupancyGrid::new(20);
        grid.fill_rect(GridCoord::new(10, 0), GridCoord::new(10, 19), CellState::Obstacle);
        let planner = Prm::new(RoadmapConfig::default().with_num_samples(100));
        let mut rng = StdRng::seed_from_u64(3);

        let result = planner.plan(
            &grid,
            GridCoord::new(2, 2),
            GridCoord::new(17, 17),
            &mut rng,
            &mut VisualizationHook::disabled(),
        );
        assert!(!result.success());
        assert_eq!(result.failure, Some(PlanFailure::NoPath));
        assert_eq!(result.iterations, None);
    }

    #[test]
    fn test_hook_sees_every_edge() {
        let grid = walled();
        let planner = Prm::new(RoadmapConfig::default().with_num_samples(80));
        let mut rng = StdRng::seed_from_u64(4);
        let mut recorder = EdgeRecorder::new();

        planner.plan(
            &grid,
            GridCoord::new(3, 3),
            GridCoord::new(26, 3),
            &mut rng,
            &mut VisualizationHook::new(true, &mut recorder),
        );

        assert!(recorder.frames() > 0);
        assert_eq!(recorder.frames(), recorder.latest().len());
    }

    #[test]
    fn test_narrow_passage_variants() {
        // Wall with a three-cell door at y = 14..16
        let mut grid = OccupancyGrid::new(30);
        grid.fill_rect(GridCoord::new(14, 0), GridCoord::new(15, 13), CellState::Obstacle);
        grid.fill_rect(GridCoord::new(14, 17), GridCoord::new(15, 29), CellState::Obstacle);
        let config = RoadmapConfig::default().with_num_samples(400);
        let start = GridCoord::new(3, 15);
        let goal = GridCoord::new(26, 15);

        let mut rng = StdRng::seed_from_u64(30);
        let gaussian = GaussianPrm::new(config.clone()).plan(
            &grid,
            start,
            goal,
            &mut rng,
            &mut VisualizationHook::disabled(),
        );
        assert_valid(&grid, &gaussian, start, goal);

        let mut rng = StdRng::seed_from_u64(31);
        let bridge = BridgePrm::new(config).plan(
            &grid,
            start,
            goal,
            &mut rng,
            &mut VisualizationHook::disabled(),
        );
        assert_valid(&grid, &bridge, start, goal);
    }
}
