//! Occupancy grid and environment.
//!
//! ## Key Types
//!
//! - [`OccupancyGrid`]: Row-major Free/Obstacle storage with bounds-checked
//!   queries. Out-of-bounds cells always read as blocked.
//! - [`Environment`]: The grid as seen at a given planner iteration
//! - [`ScheduledEnvironment`]: Scripted cell changes for exercising Dynamic RRT

mod environment;
mod storage;

pub use environment::{CellChange, Environment, ScheduledEnvironment};
pub use storage::OccupancyGrid;
