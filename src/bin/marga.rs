//! Run a planner on a text map.
//!
//! # Usage
//!
//! ```bash
//! marga --map maps/corridor.txt --planner rrt-star --seed 7
//! marga --map maps/rooms.txt --all
//! marga --size 40 --start 2,2 --goal 37,37 --planner bridge-prm --svg run.svg
//! ```
//!
//! Logging follows `RUST_LOG` (default `info`); `RUST_LOG=debug` shows each
//! planner's own diagnostics.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use marga_plan::io::{SvgConfig, SvgRenderer, load_text_map};
use marga_plan::{
    DynPlanner, EdgeRecorder, GridCoord, OccupancyGrid, PathPlanner, PlanResult, PlannerConfig,
    PlannerKind, VisualizationHook,
};

/// Sampling-based path planning on occupancy grids
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text map file (`.` free, `#` obstacle, `S` start, `G` goal)
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Side length of an empty grid, used when no map is given
    #[arg(long, default_value_t = 50)]
    size: usize,

    /// Planner configuration file
    #[arg(short, long, default_value = "configs/planner.yaml")]
    config: PathBuf,

    /// Planner to run
    #[arg(short, long, value_enum, default_value_t = PlannerKind::RrtStar)]
    planner: PlannerKind,

    /// Run every planner in turn
    #[arg(long, conflicts_with = "planner")]
    all: bool,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Start cell as `x,y` (overrides the map's `S`)
    #[arg(long, value_parser = parse_coord)]
    start: Option<GridCoord>,

    /// Goal cell as `x,y` (overrides the map's `G`)
    #[arg(long, value_parser = parse_coord)]
    goal: Option<GridCoord>,

    /// Record the planner's edges while it runs
    #[arg(short, long)]
    animate: bool,

    /// Write an SVG of the run (one file per planner with --all)
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn parse_coord(s: &str) -> Result<GridCoord, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{}'", s))?;
    let x = x.trim().parse::<i32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<i32>().map_err(|e| e.to_string())?;
    Ok(GridCoord::new(x, y))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &Path) -> Result<PlannerConfig, marga_plan::MargaError> {
    if path.exists() {
        info!("Config: {}", path.display());
        PlannerConfig::load(path)
    } else {
        warn!("Config {} not found, using defaults", path.display());
        Ok(PlannerConfig::default())
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&args.config)?;

    let (grid, map_start, map_goal) = match &args.map {
        Some(path) => {
            let map = load_text_map(path)?;
            info!(
                "Map: {} ({}x{}, {} obstacles)",
                path.display(),
                map.grid.width(),
                map.grid.height(),
                map.grid.obstacle_count()
            );
            (map.grid, map.start, map.goal)
        }
        None => {
            info!("Map: empty {}x{} grid", args.size, args.size);
            (OccupancyGrid::new(args.size), None, None)
        }
    };

    let corner = GridCoord::new(grid.width() as i32 - 1, grid.height() as i32 - 1);
    let start = args
        .start
        .or(map_start)
        .unwrap_or_default();
    let goal = args
        .goal
        .or(map_goal)
        .unwrap_or(corner);
    for (label, cell) in [("start", start), ("goal", goal)] {
        if !grid.is_free(cell) {
            return Err(format!("{} {} is blocked or outside the map", label, cell).into());
        }
    }
    info!("Start {} -> goal {}, seed {}", start, goal, args.seed);

    let kinds: Vec<PlannerKind> = if args.all {
        PlannerKind::all().to_vec()
    } else {
        vec![args.planner]
    };

    for kind in kinds {
        let planner = DynPlanner::from_kind(kind, &config);
        let mut rng = StdRng::seed_from_u64(args.seed);
        let mut recorder = EdgeRecorder::new();
        let animate = args.animate || args.svg.is_some();

        let result = {
            let mut hook = VisualizationHook::new(animate, &mut recorder);
            planner.plan(&grid, start, goal, &mut rng, &mut hook)
        };
        report(&planner, &result, &recorder, animate);

        if let Some(svg) = &args.svg {
            let out = if args.all {
                per_planner_path(svg, kind)
            } else {
                svg.clone()
            };
            SvgRenderer::new(&grid, SvgConfig::default())
                .with_title(format!("{} (seed {})", planner.name(), args.seed))
                .with_edges(recorder.take_latest())
                .with_result(&result)
                .with_endpoints(start, goal)
                .save(&out)?;
            info!("  SVG: {}", out.display());
        }
    }

    Ok(())
}

fn report(planner: &DynPlanner, result: &PlanResult, recorder: &EdgeRecorder, animate: bool) {
    if result.success() {
        info!(
            "{}: path of {} cells via {} waypoints, cost {:.2}, iterations {}, {:.2} ms",
            planner.name(),
            result.length_cells(),
            result.waypoints.len(),
            result.cost,
            result.iterations.unwrap_or_default(),
            result.elapsed_ms()
        );
    } else {
        warn!(
            "{}: no path ({:?}) after {:.2} ms",
            planner.name(),
            result.failure,
            result.elapsed_ms()
        );
    }
    if let Some((a, b)) = result.connection {
        info!("  trees joined at {} - {}", a, b);
    }
    if animate {
        info!(
            "  {} frames, {} edges at most",
            recorder.frames(),
            recorder.max_edges()
        );
    }
}

fn per_planner_path(svg: &Path, kind: PlannerKind) -> PathBuf {
    let stem = svg
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "run".to_string());
    let slug = kind
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_else(|| format!("{:?}", kind).to_lowercase());
    svg.with_file_name(format!("{}-{}.svg", stem, slug))
}
