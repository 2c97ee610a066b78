//! Core types for the planning library.
//!
//! ## Type Categories
//!
//! - [`GridCoord`]: Integer cell indices, the only point type planners use
//! - [`CellState`]: Free or Obstacle
//! - [`Edge`]: Straight segment between two cells, as reported to
//!   visualization sinks

mod cell;
mod edge;
mod point;

pub use cell::CellState;
pub use edge::Edge;
pub use point::GridCoord;
