//! marga - route planning demo for the MargaNav engine
//!
//! Usage:
//!   marga plan --waypoint 1300,925
//!   marga plan --config configs/marga.yaml --waypoint 700,900 --waypoint 1450,1450
//!   marga simulate --waypoint 1300,925 --step 40
//!   marga grid
//!
//! Enable debug logging to see search details:
//!   RUST_LOG=marga_nav=debug marga plan --waypoint 1300,925

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use serde::Serialize;

use marga_nav::{
    GuidanceUpdate, MargaConfig, NavigationState, PathSegment, PlanPoint, Result, Route,
    RoutePlanner, SmoothedPath,
};

/// Parking facility route planner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route and print it as JSON
    Plan(RouteArgs),

    /// Drive a virtual vehicle along a planned route and print guidance
    Simulate {
        #[command(flatten)]
        route: RouteArgs,

        /// Distance moved between position updates (plan units)
        #[arg(long, default_value = "30.0")]
        step: f32,
    },

    /// Print the occupancy grid as ASCII art
    Grid {
        /// Configuration file path (defaults to configs/marga.yaml or the
        /// built-in reference facility)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Configuration file path (defaults to configs/marga.yaml or the
    /// built-in reference facility)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Destination as `x,y` in plan units (1 to 3, visited in order)
    #[arg(short, long = "waypoint", value_parser = parse_point, required = true)]
    waypoints: Vec<PlanPoint>,
}

/// JSON output of `marga plan`
#[derive(Serialize)]
struct PlanReport<'a> {
    route: &'a Route,
    length_m: f32,
    smoothed: &'a SmoothedPath,
}

fn parse_point(s: &str) -> std::result::Result<PlanPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", s))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x in `{}`: {}", s, e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y in `{}`: {}", s, e))?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(format!("coordinates must be finite, got `{}`", s));
    }
    Ok(PlanPoint::new(x, y))
}

fn load_config(path: Option<&PathBuf>) -> Result<MargaConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            MargaConfig::load(path)
        }
        None => MargaConfig::load_default(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let outcome = match &cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Simulate { route, step } => run_simulate(route, *step),
        Command::Grid { config } => run_grid(config.as_ref()),
    };

    if let Err(e) = &outcome {
        error!("{}", e);
    }
    outcome
}

fn run_plan(args: &RouteArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let plan = config.build_floor_plan()?;
    let planner = RoutePlanner::new(&plan, config.to_planner_config());

    let route = planner.plan(&args.waypoints)?;
    let smoothed = planner.smooth(&route);
    let report = PlanReport {
        route: &route,
        length_m: route.length_meters(config.guidance.units_per_meter),
        smoothed: &smoothed,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_simulate(args: &RouteArgs, step: f32) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let plan = config.build_floor_plan()?;
    let planner = RoutePlanner::new(&plan, config.to_planner_config());

    let route = planner.plan(&args.waypoints)?;
    let smoothed = planner.smooth(&route);
    info!(
        "Route: {} points, {:.1} m ({} curve segments)",
        route.points().len(),
        route.length_meters(config.guidance.units_per_meter),
        smoothed
            .segments
            .iter()
            .filter(|s| matches!(s, PathSegment::Quadratic { .. }))
            .count()
    );

    let positions = walk(route.points(), step);
    let mut nav = NavigationState::new(route, config.to_guidance_config());
    for position in positions {
        let update = nav.update(position);
        println!("{}", describe(position, &update));
        if update.arrived {
            break;
        }
    }
    Ok(())
}

fn run_grid(config: Option<&PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let plan = config.build_floor_plan()?;
    print!("{}", plan.grid().to_ascii(Some(plan.entrance_cell())));
    Ok(())
}

/// Positions every `step` units along a polyline, ending on its last point.
fn walk(points: &[PlanPoint], step: f32) -> Vec<PlanPoint> {
    let step = if step > 0.0 { step } else { 30.0 };
    let mut positions = Vec::new();
    let Some(&first) = points.first() else {
        return positions;
    };

    positions.push(first);
    let mut carried = 0.0;
    for w in points.windows(2) {
        let length = w[0].distance(&w[1]);
        let mut along = step - carried;
        while along <= length {
            positions.push(w[0].lerp(&w[1], along / length));
            along += step;
        }
        carried = length - (along - step);
    }
    if positions.last() != points.last() {
        positions.extend(points.last().copied());
    }
    positions
}

fn describe(position: PlanPoint, update: &GuidanceUpdate) -> String {
    let next = update
        .instructions
        .first()
        .map(|i| format!("{} in {:.1} m", i.kind.label(), i.distance_m))
        .unwrap_or_default();
    format!(
        "[{:5.1}%] ({:7.1},{:7.1}) segment {:2}  next: {}",
        update.progress_percent, position.x, position.y, update.segment_index, next
    )
}
