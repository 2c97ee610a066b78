//! Runtime planner selection.
//!
//! [`PlannerKind`] names every planner (it doubles as a `clap` value and a
//! YAML value), and [`DynPlanner`] wraps the matching planner behind the
//! [`PathPlanner`] trait.

use clap::ValueEnum;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::core::GridCoord;
use crate::grid::OccupancyGrid;
use crate::visualization::VisualizationHook;

use super::roadmap::{BridgePrm, GaussianPrm, LazyPrm, Prm, PrmStar};
use super::tree::{DynamicRrt, GoalBiasedRrt, InformedRrtStar, Rrt, RrtConnect, RrtStar};
use super::{PathPlanner, PlanResult};

/// Available planning algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlannerKind {
    /// Basic RRT with light goal bias.
    Rrt,
    /// RRT* with choose-parent and rewiring.
    RrtStar,
    /// Bidirectional RRT.
    RrtConnect,
    /// RRT that prunes invalidated branches as the map changes.
    DynamicRrt,
    /// RRT* sampling inside the improving ellipse.
    InformedRrtStar,
    /// RRT with a heavier goal bias.
    GoalBiasedRrt,
    /// Probabilistic roadmap, k-nearest connection.
    Prm,
    /// PRM with a shrinking connection radius.
    PrmStar,
    /// PRM with edge checks deferred to query time.
    LazyPrm,
    /// PRM with obstacle-boundary sampling.
    GaussianPrm,
    /// PRM with narrow-passage sampling.
    BridgePrm,
}

impl std::fmt::Display for PlannerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlannerKind::Rrt => write!(f, "RRT"),
            PlannerKind::RrtStar => write!(f, "RRT*"),
            PlannerKind::RrtConnect => write!(f, "RRT-Connect"),
            PlannerKind::DynamicRrt => write!(f, "Dynamic RRT"),
            PlannerKind::InformedRrtStar => write!(f, "Informed RRT*"),
            PlannerKind::GoalBiasedRrt => write!(f, "Goal-biased RRT"),
            PlannerKind::Prm => write!(f, "PRM"),
            PlannerKind::PrmStar => write!(f, "PRM*"),
            PlannerKind::LazyPrm => write!(f, "Lazy PRM"),
            PlannerKind::GaussianPrm => write!(f, "Gaussian PRM"),
            PlannerKind::BridgePrm => write!(f, "Bridge PRM"),
        }
    }
}

impl PlannerKind {
    /// Get a short description of this planner.
    pub fn description(&self) -> &'static str {
        match self {
            PlannerKind::Rrt => "single tree, stops at the first node near the goal",
            PlannerKind::RrtStar => "single tree, asymptotically optimal costs",
            PlannerKind::RrtConnect => "two trees grown towards each other",
            PlannerKind::DynamicRrt => "single tree with periodic pruning",
            PlannerKind::InformedRrtStar => "RRT* refined inside an ellipse",
            PlannerKind::GoalBiasedRrt => "single tree, strong goal bias",
            PlannerKind::Prm => "roadmap, nearest neighbors",
            PlannerKind::PrmStar => "roadmap, radius shrinking with size",
            PlannerKind::LazyPrm => "roadmap, edges checked on demand",
            PlannerKind::GaussianPrm => "roadmap, samples near obstacles",
            PlannerKind::BridgePrm => "roadmap, samples in narrow gaps",
        }
    }

    /// True for the tree-growing family
    pub fn is_tree(&self) -> bool {
        matches!(
            self,
            PlannerKind::Rrt
                | PlannerKind::RrtStar
                | PlannerKind::RrtConnect
                | PlannerKind::DynamicRrt
                | PlannerKind::InformedRrtStar
                | PlannerKind::GoalBiasedRrt
        )
    }

    /// Returns all available planner kinds.
    pub fn all() -> &'static [PlannerKind] {
        &[
            PlannerKind::Rrt,
            PlannerKind::RrtStar,
            PlannerKind::RrtConnect,
            PlannerKind::DynamicRrt,
            PlannerKind::InformedRrtStar,
            PlannerKind::GoalBiasedRrt,
            PlannerKind::Prm,
            PlannerKind::PrmStar,
            PlannerKind::LazyPrm,
            PlannerKind::GaussianPrm,
            PlannerKind::BridgePrm,
        ]
    }
}

/// Runtime-selected planner.
#[derive(Clone, Debug)]
pub enum DynPlanner {
    Rrt(Rrt),
    RrtStar(RrtStar),
    RrtConnect(RrtConnect),
    DynamicRrt(DynamicRrt),
    InformedRrtStar(InformedRrtStar),
    GoalBiasedRrt(GoalBiasedRrt),
    Prm(Prm),
    PrmStar(PrmStar),
    LazyPrm(LazyPrm),
    GaussianPrm(GaussianPrm),
    BridgePrm(BridgePrm),
}

impl DynPlanner {
    /// Create a planner with default configuration.
    pub fn new(kind: PlannerKind) -> Self {
        Self::from_kind(kind, &PlannerConfig::default())
    }

    /// Create a planner of `kind`, taking its section of `config`.
    pub fn from_kind(kind: PlannerKind, config: &PlannerConfig) -> Self {
        let tree = config.tree.clone();
        let roadmap = config.roadmap.clone();
        match kind {
            PlannerKind::Rrt => DynPlanner::Rrt(Rrt::new(tree)),
            PlannerKind::RrtStar => DynPlanner::RrtStar(RrtStar::new(tree)),
            PlannerKind::RrtConnect => DynPlanner::RrtConnect(RrtConnect::new(tree)),
            PlannerKind::DynamicRrt => DynPlanner::DynamicRrt(DynamicRrt::new(tree)),
            PlannerKind::InformedRrtStar => {
                DynPlanner::InformedRrtStar(InformedRrtStar::new(tree))
            }
            PlannerKind::GoalBiasedRrt => DynPlanner::GoalBiasedRrt(GoalBiasedRrt::new(tree)),
            PlannerKind::Prm => DynPlanner::Prm(Prm::new(roadmap)),
            PlannerKind::PrmStar => DynPlanner::PrmStar(PrmStar::new(roadmap)),
            PlannerKind::LazyPrm => DynPlanner::LazyPrm(LazyPrm::new(roadmap)),
            PlannerKind::GaussianPrm => DynPlanner::GaussianPrm(GaussianPrm::new(roadmap)),
            PlannerKind::BridgePrm => DynPlanner::BridgePrm(BridgePrm::new(roadmap)),
        }
    }

    /// Get the planner kind.
    pub fn kind(&self) -> PlannerKind {
        match self {
            DynPlanner::Rrt(_) => PlannerKind::Rrt,
            DynPlanner::RrtStar(_) => PlannerKind::RrtStar,
            DynPlanner::RrtConnect(_) => PlannerKind::RrtConnect,
            DynPlanner::DynamicRrt(_) => PlannerKind::DynamicRrt,
            DynPlanner::InformedRrtStar(_) => PlannerKind::InformedRrtStar,
            DynPlanner::GoalBiasedRrt(_) => PlannerKind::GoalBiasedRrt,
            DynPlanner::Prm(_) => PlannerKind::Prm,
            DynPlanner::PrmStar(_) => PlannerKind::PrmStar,
            DynPlanner::LazyPrm(_) => PlannerKind::LazyPrm,
            DynPlanner::GaussianPrm(_) => PlannerKind::GaussianPrm,
            DynPlanner::BridgePrm(_) => PlannerKind::BridgePrm,
        }
    }

    fn inner(&self) -> &dyn PathPlanner {
        match self {
            DynPlanner::Rrt(p) => p,
            DynPlanner::RrtStar(p) => p,
            DynPlanner::RrtConnect(p) => p,
            DynPlanner::DynamicRrt(p) => p,
            DynPlanner::InformedRrtStar(p) => p,
            DynPlanner::GoalBiasedRrt(p) => p,
            DynPlanner::Prm(p) => p,
            DynPlanner::PrmStar(p) => p,
            DynPlanner::LazyPrm(p) => p,
            DynPlanner::GaussianPrm(p) => p,
            DynPlanner::BridgePrm(p) => p,
        }
    }
}

impl PathPlanner for DynPlanner {
    fn plan(
        &self,
        grid: &OccupancyGrid,
        start: GridCoord,
        goal: GridCoord,
        rng: &mut dyn RngCore,
        hook: &mut VisualizationHook<'_>,
    ) -> PlanResult {
        self.inner().plan(grid, start, goal, rng, hook)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}
