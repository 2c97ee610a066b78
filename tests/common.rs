//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use marga_plan::geometry::line_of_sight;
use marga_plan::io::{TextMap, load_text_map};
use marga_plan::path::is_contiguous;
use marga_plan::{CellState, GridCoord, OccupancyGrid, PlanResult};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seeded generator for reproducible runs.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Load a map shipped in `maps/`.
pub fn load_map(name: &str) -> TextMap {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("maps")
        .join(name);
    load_text_map(&path).unwrap_or_else(|e| panic!("failed to load {}: {}", path.display(), e))
}

/// 30×30 grid with a wall at x = 14..15 leaving rows 23..29 open.
pub fn walled_grid() -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(30);
    grid.fill_rect(
        GridCoord::new(14, 0),
        GridCoord::new(15, 22),
        CellState::Obstacle,
    );
    grid
}

/// Check everything a successful result promises.
pub fn assert_valid_path(
    grid: &OccupancyGrid,
    result: &PlanResult,
    start: GridCoord,
    goal: GridCoord,
) {
    assert!(result.success(), "no path: {:?}", result.failure);
    assert_eq!(result.path.first(), Some(&start));
    assert_eq!(result.path.last(), Some(&goal));
    assert!(is_contiguous(&result.path), "path has gaps");
    for &cell in &result.path {
        assert!(grid.is_free(cell), "path crosses {}", cell);
    }
    assert!(result.iterations.is_some());
    assert!(result.failure.is_none());
    assert!(result.cost.is_finite());
}

/// True if every consecutive waypoint pair has line of sight.
pub fn waypoints_visible(grid: &OccupancyGrid, result: &PlanResult) -> bool {
    result
        .waypoints
        .windows(2)
        .all(|pair| line_of_sight(grid, pair[0], pair[1]))
}
