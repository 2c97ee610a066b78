//! Map loading and run export.
//!
//! - **Text maps**: `.` free, `#` obstacle, `S`/`G` start and goal
//! - **SVG export**: grid, explored edges and the final path
//!
//! ```rust,ignore
//! use marga_plan::io::{SvgConfig, SvgRenderer, load_text_map};
//! use std::path::Path;
//!
//! let map = load_text_map(Path::new("maps/corridor.txt"))?;
//! SvgRenderer::new(&map.grid, SvgConfig::default())
//!     .with_result(&result)
//!     .save(Path::new("run.svg"))?;
//! ```

pub mod map_text;
pub mod svg;

pub use map_text::{TextMap, load_text_map, parse_text_map, save_text_map, to_text};
pub use svg::{SvgColorScheme, SvgConfig, SvgRenderer};
