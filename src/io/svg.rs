//! SVG rendering of a planning run.
//!
//! Draws the occupancy grid, the planner's explored structure (the last edge
//! list seen by the visualization hook), the final path and its waypoints,
//! and the start/goal markers. Grid row 0 is drawn at the top, matching the
//! text map layout.

use std::fmt::{self, Write};
use std::path::Path;

use crate::core::{Edge, GridCoord};
use crate::grid::OccupancyGrid;
use crate::planning::PlanResult;

/// SVG color scheme
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Obstacle color
    pub obstacle: &'static str,
    /// Free cell color
    pub free: &'static str,
    /// Tree/roadmap edge color
    pub edge: &'static str,
    /// Final path color
    pub path: &'static str,
    /// Waypoint marker color
    pub waypoint: &'static str,
    /// Start marker color
    pub start: &'static str,
    /// Goal marker color
    pub goal: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            obstacle: "#333333",
            free: "#FFFFFF",
            edge: "#88AADD",
            path: "#DD2222",
            waypoint: "#FF8800",
            start: "#22AA22",
            goal: "#2222AA",
        }
    }
}

/// Configuration for SVG rendering
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per cell
    pub scale: f32,
    /// Explored edge width
    pub edge_width: f32,
    /// Path line width
    pub path_width: f32,
    /// Start/goal marker radius
    pub marker_radius: f32,
    /// Color scheme
    pub colors: SvgColorScheme,
    /// Padding around the map in pixels
    pub padding: f32,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            scale: 12.0,
            edge_width: 1.0,
            path_width: 3.0,
            marker_radius: 5.0,
            colors: SvgColorScheme::default(),
            padding: 20.0,
        }
    }
}

/// SVG builder for one planning run.
pub struct SvgRenderer<'a> {
    config: SvgConfig,
    grid: &'a OccupancyGrid,
    title: Option<String>,
    edges: Vec<Edge>,
    path: Vec<GridCoord>,
    waypoints: Vec<GridCoord>,
    start: Option<GridCoord>,
    goal: Option<GridCoord>,
}

impl<'a> SvgRenderer<'a> {
    /// Create a renderer for `grid`
    pub fn new(grid: &'a OccupancyGrid, config: SvgConfig) -> Self {
        Self {
            config,
            grid,
            title: None,
            edges: Vec::new(),
            path: Vec::new(),
            waypoints: Vec::new(),
            start: None,
            goal: None,
        }
    }

    /// Set a title to display
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add explored edges (tree or roadmap)
    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = edges;
        self
    }

    /// Add start and goal markers
    pub fn with_endpoints(mut self, start: GridCoord, goal: GridCoord) -> Self {
        self.start = Some(start);
        self.goal = Some(goal);
        self
    }

    /// Add the path and waypoints of a result
    pub fn with_result(mut self, result: &PlanResult) -> Self {
        self.path = result.path.clone();
        self.waypoints = result.waypoints.clone();
        self
    }

    /// Render to SVG string
    pub fn render(&self) -> String {
        let mut svg = String::new();
        // Writing into a String does not fail
        let _ = self.write_svg(&mut svg);
        svg
    }

    /// Save to a file
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        std::fs::write(path, self.render())
    }

    /// Pixel center of a cell
    fn center(&self, coord: GridCoord) -> (f32, f32) {
        let s = self.config.scale;
        ((coord.x as f32 + 0.5) * s, (coord.y as f32 + 0.5) * s)
    }

    fn write_svg(&self, svg: &mut String) -> fmt::Result {
        let map_width = self.grid.width() as f32 * self.config.scale;
        let map_height = self.grid.height() as f32 * self.config.scale;
        let padding = self.config.padding;
        let title_height = if self.title.is_some() { 30.0 } else { 0.0 };

        let width = map_width + 2.0 * padding;
        let height = map_height + 2.0 * padding + title_height;

        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )?;
        writeln!(svg, r##"  <rect width="100%" height="100%" fill="#F8F8F8"/>"##)?;

        if let Some(ref title) = self.title {
            writeln!(
                svg,
                r##"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">{}</text>"##,
                width / 2.0,
                title
            )?;
        }

        writeln!(
            svg,
            r#"  <g transform="translate({:.0}, {:.0})">"#,
            padding,
            padding + title_height
        )?;
        self.write_grid(svg, map_width, map_height)?;
        self.write_edges(svg)?;
        self.write_path(svg)?;
        self.write_endpoints(svg)?;
        writeln!(svg, "  </g>")?;
        writeln!(svg, "</svg>")
    }

    fn write_grid(&self, svg: &mut String, map_width: f32, map_height: f32) -> fmt::Result {
        let cell = self.config.scale;
        writeln!(svg, r#"    <g id="grid">"#)?;
        writeln!(
            svg,
            r#"      <rect width="{:.0}" height="{:.0}" fill="{}"/>"#,
            map_width, map_height, self.config.colors.free
        )?;
        for (coord, state) in self.grid.iter() {
            if state.is_free() {
                continue;
            }
            writeln!(
                svg,
                r#"      <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                coord.x as f32 * cell,
                coord.y as f32 * cell,
                cell,
                cell,
                self.config.colors.obstacle
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn write_edges(&self, svg: &mut String) -> fmt::Result {
        if self.edges.is_empty() {
            return Ok(());
        }
        writeln!(
            svg,
            r#"    <g id="edges" stroke="{}" stroke-width="{}" opacity="0.7">"#,
            self.config.colors.edge, self.config.edge_width
        )?;
        for edge in &self.edges {
            let (x1, y1) = self.center(edge.from);
            let (x2, y2) = self.center(edge.to);
            writeln!(
                svg,
                r#"      <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
                x1, y1, x2, y2
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn write_path(&self, svg: &mut String) -> fmt::Result {
        if self.path.is_empty() {
            return Ok(());
        }
        writeln!(svg, r#"    <g id="path">"#)?;

        let mut d = String::new();
        for (i, &coord) in self.path.iter().enumerate() {
            let (px, py) = self.center(coord);
            if i == 0 {
                write!(d, "M {:.1} {:.1}", px, py)?;
            } else {
                write!(d, " L {:.1} {:.1}", px, py)?;
            }
        }
        writeln!(
            svg,
            r#"      <path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            d, self.config.colors.path, self.config.path_width
        )?;

        for &coord in &self.waypoints {
            let (px, py) = self.center(coord);
            writeln!(
                svg,
                r#"      <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                px,
                py,
                self.config.path_width,
                self.config.colors.waypoint
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn write_endpoints(&self, svg: &mut String) -> fmt::Result {
        let markers = [
            (self.start, "S", self.config.colors.start),
            (self.goal, "G", self.config.colors.goal),
        ];
        for (coord, label, color) in markers {
            let Some(coord) = coord else { continue };
            let (px, py) = self.center(coord);
            writeln!(
                svg,
                r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="white" stroke-width="1"/>"#,
                px, py, self.config.marker_radius, color
            )?;
            writeln!(
                svg,
                r#"    <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" fill="{}" text-anchor="middle" dy="-8">{}</text>"#,
                px, py, color, label
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;

    #[test]
    fn test_render_contains_layers() {
        let mut grid = OccupancyGrid::new(5);
        grid.set(GridCoord::new(2, 2), CellState::Obstacle);
        let start = GridCoord::new(0, 0);
        let goal = GridCoord::new(4, 4);

        let svg = SvgRenderer::new(&grid, SvgConfig::default())
            .with_title("test")
            .with_edges(vec![Edge::new(start, GridCoord::new(1, 0))])
            .with_endpoints(start, goal)
            .render();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"<g id="grid">"#));
        assert!(svg.contains(r#"<g id="edges""#));
        assert!(!svg.contains(r#"<g id="path">"#));
        // Only obstacle rects are positioned
        assert_eq!(svg.matches("<rect x=").count(), 1);
        assert!(svg.contains(">S</text>"));
    }

    #[test]
    fn test_path_layer() {
        let grid = OccupancyGrid::new(3);
        let result_path = vec![GridCoord::new(0, 0), GridCoord::new(1, 1)];
        let renderer = SvgRenderer {
            path: result_path.clone(),
            waypoints: result_path,
            ..SvgRenderer::new(&grid, SvgConfig::default())
        };
        let svg = renderer.render();
        assert!(svg.contains("M 6.0 6.0 L 18.0 18.0"));
        assert_eq!(svg.matches("<circle").count(), 2);
    }
}
