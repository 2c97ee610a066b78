//! Plain-text occupancy maps.
//!
//! One line per grid row, top row first, one character per cell:
//!
//! ```text
//! S....#....
//! .....#....
//! .....#...G
//! ```
//!
//! | Char | Meaning |
//! |------|---------|
//! | `.` | free |
//! | `#` | obstacle |
//! | `S` | free, start cell |
//! | `G` | free, goal cell |
//!
//! Blank lines are ignored. Every row must have the same width.

use std::path::Path;

use crate::core::{CellState, GridCoord};
use crate::error::{MargaError, Result};
use crate::grid::OccupancyGrid;

/// A parsed text map.
#[derive(Clone, Debug)]
pub struct TextMap {
    /// Occupancy grid
    pub grid: OccupancyGrid,
    /// `S` marker, if present
    pub start: Option<GridCoord>,
    /// `G` marker, if present
    pub goal: Option<GridCoord>,
}

/// Load a text map from a file.
pub fn load_text_map(path: &Path) -> Result<TextMap> {
    let contents = std::fs::read_to_string(path)?;
    parse_text_map(&contents)
}

/// Parse a text map.
pub fn parse_text_map(text: &str) -> Result<TextMap> {
    let mut rows: Vec<Vec<bool>> = Vec::new();
    let mut start = None;
    let mut goal = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let y = rows.len() as i32;
        let mut row = Vec::with_capacity(line.len());
        for (x, ch) in line.chars().enumerate() {
            let coord = GridCoord::new(x as i32, y);
            let occupied = match ch {
                '.' => false,
                '#' => true,
                'S' => {
                    set_marker(&mut start, coord, 'S', line_no)?;
                    false
                }
                'G' => {
                    set_marker(&mut goal, coord, 'G', line_no)?;
                    false
                }
                other => {
                    return Err(MargaError::MapParse {
                        line: line_no,
                        reason: format!("unexpected character '{}' at column {}", other, x + 1),
                    });
                }
            };
            row.push(occupied);
        }

        if let Some(first) = rows.first()
            && first.len() != row.len()
        {
            return Err(MargaError::MapParse {
                line: line_no,
                reason: format!("row has {} cells, expected {}", row.len(), first.len()),
            });
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(MargaError::MapParse {
            line: 0,
            reason: "map has no rows".to_string(),
        });
    }

    let grid = OccupancyGrid::from_rows(&rows).ok_or_else(|| MargaError::MapParse {
        line: 0,
        reason: "ragged rows".to_string(),
    })?;

    Ok(TextMap { grid, start, goal })
}

fn set_marker(
    slot: &mut Option<GridCoord>,
    coord: GridCoord,
    marker: char,
    line: usize,
) -> Result<()> {
    if let Some(previous) = slot {
        return Err(MargaError::MapParse {
            line,
            reason: format!("second '{}' marker (first at {})", marker, previous),
        });
    }
    *slot = Some(coord);
    Ok(())
}

/// Render a grid (and optional markers) back to the text format.
pub fn to_text(grid: &OccupancyGrid, start: Option<GridCoord>, goal: Option<GridCoord>) -> String {
    let mut text = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let coord = GridCoord::new(x, y);
            let ch = if Some(coord) == start {
                'S'
            } else if Some(coord) == goal {
                'G'
            } else {
                grid.get(coord).unwrap_or(CellState::Obstacle).symbol()
            };
            text.push(ch);
        }
        text.push('\n');
    }
    text
}

/// Write a grid in the text format.
pub fn save_text_map(
    grid: &OccupancyGrid,
    start: Option<GridCoord>,
    goal: Option<GridCoord>,
    path: &Path,
) -> Result<()> {
    std::fs::write(path, to_text(grid, start, goal))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
S..#.
...#.
.....
...#G
";

    #[test]
    fn test_parse_markers_and_cells() {
        let map = parse_text_map(MAP).unwrap();
        assert_eq!(map.grid.width(), 5);
        assert_eq!(map.grid.height(), 4);
        assert_eq!(map.start, Some(GridCoord::new(0, 0)));
        assert_eq!(map.goal, Some(GridCoord::new(4, 3)));
        assert!(map.grid.is_free(GridCoord::new(0, 0)));
        assert!(map.grid.is_free(GridCoord::new(4, 3)));
        assert!(map.grid.is_blocked(GridCoord::new(3, 0)));
        assert!(map.grid.is_free(GridCoord::new(3, 2)));
        assert_eq!(map.grid.obstacle_count(), 3);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let map = parse_text_map("\n..\n\n.#\n\n").unwrap();
        assert_eq!(map.grid.height(), 2);
        assert!(map.grid.is_blocked(GridCoord::new(1, 1)));
        assert_eq!(map.start, None);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = parse_text_map("...\n..\n").unwrap_err();
        match err {
            MargaError::MapParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_character_rejected() {
        let err = parse_text_map("..\n.x\n").unwrap_err();
        assert!(matches!(err, MargaError::MapParse { line: 2, .. }));
    }

    #[test]
    fn test_duplicate_marker_rejected() {
        let err = parse_text_map("S.\n.S\n").unwrap_err();
        assert!(matches!(err, MargaError::MapParse { line: 2, .. }));
    }

    #[test]
    fn test_empty_map_rejected() {
        assert!(parse_text_map("\n\n").is_err());
    }

    #[test]
    fn test_to_text_matches_input() {
        let map = parse_text_map(MAP).unwrap();
        assert_eq!(to_text(&map.grid, map.start, map.goal), MAP);
    }
}
