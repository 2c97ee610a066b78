//! Sampling-based path planners.
//!
//! Two families share one calling convention: every planner takes the grid,
//! start and goal cells, a random generator and a [`VisualizationHook`], and
//! returns a [`PlanResult`]. Not finding a path is a normal result carrying a
//! [`PlanFailure`], never an error.
//!
//! - [`tree`]: RRT, Goal-biased RRT, RRT*, RRT-Connect, Dynamic RRT,
//!   Informed RRT*
//! - [`roadmap`]: PRM, PRM*, Lazy PRM, Gaussian PRM, Bridge PRM
//!
//! [`PlannerKind`] and [`DynPlanner`] select a planner at runtime.
//!
//! # Example
//!
//! ```rust,ignore
//! use marga_plan::planning::{DynPlanner, PathPlanner, PlannerKind};
//! use marga_plan::{PlannerConfig, VisualizationHook};
//! use rand::SeedableRng;
//!
//! let planner = DynPlanner::from_kind(PlannerKind::RrtStar, &PlannerConfig::default());
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let result = planner.plan(&grid, start, goal, &mut rng, &mut VisualizationHook::disabled());
//! ```

mod registry;
mod types;

pub mod roadmap;
pub mod tree;

pub use registry::{DynPlanner, PlannerKind};
pub use types::{PlanFailure, PlanResult};

use rand::RngCore;

use crate::core::GridCoord;
use crate::grid::OccupancyGrid;
use crate::visualization::VisualizationHook;

/// Object-safe planning interface shared by every planner.
pub trait PathPlanner {
    /// Plan a path from `start` to `goal` on `grid`.
    fn plan(
        &self,
        grid: &OccupancyGrid,
        start: GridCoord,
        goal: GridCoord,
        rng: &mut dyn RngCore,
        hook: &mut VisualizationHook<'_>,
    ) -> PlanResult;

    /// Short planner name, used in logs.
    fn name(&self) -> &'static str;
}

macro_rules! impl_path_planner {
    ($($planner:ty => $name:literal),* $(,)?) => {
        $(
            impl PathPlanner for $planner {
                fn plan(
                    &self,
                    grid: &OccupancyGrid,
                    start: GridCoord,
                    goal: GridCoord,
                    rng: &mut dyn RngCore,
                    hook: &mut VisualizationHook<'_>,
                ) -> PlanResult {
                    <$planner>::plan(self, grid, start, goal, rng, hook)
                }

                fn name(&self) -> &'static str {
                    $name
                }
            }
        )*
    };
}

impl_path_planner! {
    tree::Rrt => "RRT",
    tree::GoalBiasedRrt => "Goal-biased RRT",
    tree::RrtStar => "RRT*",
    tree::RrtConnect => "RRT-Connect",
    tree::DynamicRrt => "Dynamic RRT",
    tree::InformedRrtStar => "Informed RRT*",
    roadmap::Prm => "PRM",
    roadmap::PrmStar => "PRM*",
    roadmap::LazyPrm => "Lazy PRM",
    roadmap::GaussianPrm => "Gaussian PRM",
    roadmap::BridgePrm => "Bridge PRM",
}
