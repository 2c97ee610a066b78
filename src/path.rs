//! Path post-processing.
//!
//! Planners produce sparse waypoints (tree nodes or roadmap vertices).
//! [`densify`] turns them into a contiguous unit-step cell sequence by
//! concatenating the raster of each segment.

use crate::core::GridCoord;
use crate::geometry::interpolate;

/// Expand sparse waypoints into a contiguous unit-step path.
///
/// Each consecutive pair is rasterized with [`interpolate`] and the shared
/// endpoint between segments is emitted once. Already-contiguous input
/// comes back unchanged.
pub fn densify(waypoints: &[GridCoord]) -> Vec<GridCoord> {
    match waypoints {
        [] => Vec::new(),
        [single] => vec![*single],
        _ => {
            let mut dense = vec![waypoints[0]];
            for pair in waypoints.windows(2) {
                dense.extend(interpolate(pair[0], pair[1]).into_iter().skip(1));
            }
            dense
        }
    }
}

/// Total Euclidean length of a path.
pub fn path_length(path: &[GridCoord]) -> f32 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

/// True if every consecutive pair of cells is 8-connected adjacent.
pub fn is_contiguous(path: &[GridCoord]) -> bool {
    path.windows(2).all(|w| w[0].is_adjacent(&w[1]))
}
