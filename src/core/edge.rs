//! Straight-line edge between two cells.

use serde::{Deserialize, Serialize};

use super::GridCoord;

/// A directed edge between two grid cells.
///
/// Tree edges point from parent to child. Roadmap edges are undirected and
/// reported once, from the lower-indexed node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source cell
    pub from: GridCoord,
    /// Destination cell
    pub to: GridCoord,
}

impl Edge {
    /// Create a new edge
    #[inline]
    pub fn new(from: GridCoord, to: GridCoord) -> Self {
        Self { from, to }
    }

    /// Euclidean length of the edge
    #[inline]
    pub fn length(&self) -> f32 {
        self.from.distance(&self.to)
    }

    /// Same edge with endpoints swapped
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.to, self.from)
    }
}
