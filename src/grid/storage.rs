//! Occupancy grid storage.

use rand::Rng;

use crate::core::{CellState, GridCoord};

/// Row-major occupancy grid.
///
/// The grid uses a coordinate system where:
/// - (0, 0) is the first cell of the first row
/// - X indexes columns, Y indexes rows
/// - Anything outside `0..width` × `0..height` is treated as blocked
///
/// Planners only ever borrow the grid immutably.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Vec<CellState>,
    width: usize,
    height: usize,
}

impl OccupancyGrid {
    /// Create a square, fully free grid of `size` × `size` cells.
    pub fn new(size: usize) -> Self {
        Self::with_dimensions(size, size)
    }

    /// Create a fully free grid with the given dimensions.
    pub fn with_dimensions(width: usize, height: usize) -> Self {
        Self {
            cells: vec![CellState::Free; width * height],
            width,
            height,
        }
    }

    /// Build a grid from rows of occupancy flags (`true` = obstacle).
    ///
    /// Returns `None` if the rows are ragged.
    pub fn from_rows<R>(rows: &[R]) -> Option<Self>
    where
        R: AsRef<[bool]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(width * height);

        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            cells.extend(row.iter().map(|&occupied| CellState::from(occupied)));
        }

        Some(Self {
            cells,
            width,
            height,
        })
    }

    // === Basic Properties ===

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Side length of the equivalent square grid, `sqrt(width * height)`.
    #[inline]
    pub fn side_length(&self) -> f32 {
        ((self.width * self.height) as f32).sqrt()
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the grid has no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // === Queries ===

    /// Check if a coordinate lies inside the grid
    #[inline]
    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Cell state, or `None` when out of bounds
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<CellState> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// True if the coordinate is in bounds and free
    #[inline]
    pub fn is_free(&self, coord: GridCoord) -> bool {
        self.get(coord) == Some(CellState::Free)
    }

    /// True if the coordinate is out of bounds or occupied
    #[inline]
    pub fn is_blocked(&self, coord: GridCoord) -> bool {
        !self.is_free(coord)
    }

    /// Number of occupied cells
    pub fn obstacle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == CellState::Obstacle)
            .count()
    }

    /// Iterate over all cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellState)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, &state)| {
            (
                GridCoord::new((i % width) as i32, (i / width) as i32),
                state,
            )
        })
    }

    // === Mutation (callers only; planners never mutate) ===

    /// Set the state of a cell. Returns false if out of bounds.
    pub fn set(&mut self, coord: GridCoord, state: CellState) -> bool {
        match self.index(coord) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// Mark every cell of the axis-aligned rectangle `[min, max]` (inclusive).
    ///
    /// Cells outside the grid are ignored.
    pub fn fill_rect(&mut self, min: GridCoord, max: GridCoord, state: CellState) {
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                self.set(GridCoord::new(x, y), state);
            }
        }
    }

    // === Sampling ===

    /// Uniformly random coordinate inside the grid.
    ///
    /// Must not be called on an empty grid.
    pub fn random_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> GridCoord {
        GridCoord::new(
            rng.random_range(0..self.width) as i32,
            rng.random_range(0..self.height) as i32,
        )
    }
}
