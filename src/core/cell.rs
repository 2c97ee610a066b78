//! Occupancy cell state.

use serde::{Deserialize, Serialize};

/// State of a single occupancy grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Traversable cell
    #[default]
    Free = 0,
    /// Blocked cell
    Obstacle = 1,
}

impl CellState {
    /// True if the cell can be occupied by the robot
    #[inline]
    pub fn is_free(self) -> bool {
        self == CellState::Free
    }

    /// Map the text map character for this state
    pub fn symbol(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Obstacle => '#',
        }
    }
}

impl From<bool> for CellState {
    /// `true` means occupied.
    fn from(occupied: bool) -> Self {
        if occupied {
            CellState::Obstacle
        } else {
            CellState::Free
        }
    }
}
