//! # MargaPlan
//!
//! Sampling-based motion planning on 2D occupancy grids.
//!
//! ## Overview
//!
//! Two planner families find a collision-free path between two free cells:
//!
//! - **Tree planners**: RRT, Goal-biased RRT, RRT*, RRT-Connect, Dynamic RRT,
//!   Informed RRT*
//! - **Roadmap planners**: PRM, PRM*, Lazy PRM, Gaussian PRM, Bridge PRM
//!
//! Every planner borrows the grid, draws randomness from a caller-supplied
//! generator and returns a [`PlanResult`] holding the sparse waypoints and a
//! densified unit-step path. Failing to find a path is a normal result with a
//! [`PlanFailure`] reason.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marga_plan::{GridCoord, OccupancyGrid, VisualizationHook};
//! use marga_plan::planning::tree::RrtStar;
//! use rand::SeedableRng;
//!
//! let grid = OccupancyGrid::new(50);
//! let planner = RrtStar::with_defaults();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let result = planner.plan(
//!     &grid,
//!     GridCoord::new(2, 2),
//!     GridCoord::new(45, 45),
//!     &mut rng,
//!     &mut VisualizationHook::disabled(),
//! );
//! if result.success() {
//!     println!("{} cells, cost {:.1}", result.path.len(), result.cost);
//! }
//! ```
//!
//! ## Coordinate System
//!
//! Cells are addressed by integer `(x, y)`, `x` along a row and `y` down the
//! rows. Anything outside the grid reads as blocked.

// Core types
pub mod core;

// Occupancy grid and environments
pub mod grid;

// Line of sight, interpolation, steering
pub mod geometry;

// Densification and path metrics
pub mod path;

// Planner configuration
pub mod config;

// Planners
pub mod planning;

// Incremental edge reporting
pub mod visualization;

// Text maps and SVG export
pub mod io;

pub mod error;

// Re-export commonly used types
pub use core::{CellState, Edge, GridCoord};

pub use grid::{Environment, OccupancyGrid, ScheduledEnvironment};

pub use config::{PlannerConfig, RoadmapConfig, TreeConfig};

pub use error::{MargaError, Result};

pub use planning::{DynPlanner, PathPlanner, PlanFailure, PlanResult, PlannerKind};

pub use visualization::{EdgeRecorder, EdgeSink, VisualizationHook};
