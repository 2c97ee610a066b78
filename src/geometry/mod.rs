//! Geometry kernel shared by every planner.
//!
//! - [`distance`]: Euclidean distance between cells
//! - [`line_of_sight`]: Rasterized collision test for a straight segment
//! - [`interpolate`]: Dense unit-step cells along the same raster
//! - [`steer`]: Fixed-length step from one cell towards another

mod bresenham;

pub use bresenham::BresenhamLine;

use crate::core::GridCoord;
use crate::grid::OccupancyGrid;

/// Euclidean distance between two cells.
#[inline]
pub fn distance(a: GridCoord, b: GridCoord) -> f32 {
    a.distance(&b)
}

/// Raster endpoints in a fixed order, so `a -> b` and `b -> a` cover the
/// same cells. Returns `true` when the pair was swapped.
#[inline]
fn canonical(a: GridCoord, b: GridCoord) -> (GridCoord, GridCoord, bool) {
    if (a.x, a.y) <= (b.x, b.y) {
        (a, b, false)
    } else {
        (b, a, true)
    }
}

/// True if every cell on the Bresenham raster between `a` and `b` (both
/// endpoints included) is inside the grid and free.
///
/// Symmetric in its endpoints.
pub fn line_of_sight(grid: &OccupancyGrid, a: GridCoord, b: GridCoord) -> bool {
    let (from, to, _) = canonical(a, b);
    BresenhamLine::new(from, to).all(|cell| grid.is_free(cell))
}

/// Dense unit-step sequence from `a` to `b`, both endpoints included.
///
/// Visits exactly the cells [`line_of_sight`] inspects for the same pair.
pub fn interpolate(a: GridCoord, b: GridCoord) -> Vec<GridCoord> {
    let (from, to, swapped) = canonical(a, b);
    let mut cells = Vec::with_capacity(BresenhamLine::cell_count(a, b));
    cells.extend(BresenhamLine::new(from, to));
    if swapped {
        cells.reverse();
    }
    cells
}

/// Step `step_size` cells from `from` towards `toward`, rounded to the grid.
///
/// Returns `None` when the two cells coincide (no direction to steer in).
/// The result may lie outside the grid; callers check bounds.
pub fn steer(from: GridCoord, toward: GridCoord, step_size: f32) -> Option<GridCoord> {
    let dir_x = (toward.x - from.x) as f32;
    let dir_y = (toward.y - from.y) as f32;
    let length = (dir_x * dir_x + dir_y * dir_y).sqrt();
    if length == 0.0 {
        return None;
    }

    Some(GridCoord::new(
        (from.x as f32 + step_size * dir_x / length).round() as i32,
        (from.y as f32 + step_size * dir_y / length).round() as i32,
    ))
}
