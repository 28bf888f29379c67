use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use geo::Point;
use milagro_transit::prelude::{
    BlockedStreetSet, FleetPlanner, MapScene, NetworkConfig, NetworkProvider, PriorityTier,
    RouteTimeEstimator, StaticNetworkProvider, StreetName,
};
use milagro_transit::spatial::map_distance;
use serde::Serialize;
use std::path::PathBuf;

mod output;
mod report;

use output::write_scene_geojson;

#[derive(Parser, Debug)]
#[command(
    name = "milagro-sim",
    author,
    version,
    about = "Trip times and fleet allocation for the Milagro bus network",
    long_about = "Looks up precomputed travel times between adjacent stops, adds a surcharge \
                  for each blocked street on the way, and shares the bus fleet across the \
                  demand routes.\n\n\
                  Reference data is built in; pass --config to load a JSON file with the \
                  same structure instead (see `milagro-sim dump-config`)."
)]
struct Args {
    /// JSON reference data file (stops, segments, streets, fleet)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the bus stops
    Stops,

    /// List blockable streets, marking the blocked ones
    Streets {
        /// Street to treat as blocked (repeatable)
        #[arg(short, long = "blocked")]
        blocked: Vec<String>,
    },

    /// Estimate travel time between two adjacent stops
    Estimate {
        /// Origin stop id
        #[arg(long)]
        from: String,

        /// Destination stop id
        #[arg(long)]
        to: String,

        /// Street to treat as blocked (repeatable)
        #[arg(short, long = "blocked")]
        blocked: Vec<String>,
    },

    /// Share the fleet across the demand routes
    Allocate {
        /// Only show routes of this priority (muy-alta, alta, media, baja)
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Fleet summary figures
    Stats,

    /// Allocation, daily trips and recommendation for one route
    Analyze {
        /// Route key, "<from>-<to>" as listed by `allocate`
        #[arg(short, long)]
        route: String,
    },

    /// Departure times for one route over the service window
    Timetable {
        /// Route key, "<from>-<to>" as listed by `allocate`
        #[arg(short, long)]
        route: String,
    },

    /// Find the stop closest to a map position
    Nearest {
        /// Map x coordinate
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// Map y coordinate
        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Also list every stop within this many map units
        #[arg(short, long)]
        radius: Option<f64>,
    },

    /// Export the network map (and optionally a trip) as GeoJSON
    Map {
        /// Output GeoJSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Origin stop id of the trip to highlight
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Destination stop id of the trip to highlight
        #[arg(long, requires = "from")]
        to: Option<String>,

        /// Street to treat as blocked (repeatable)
        #[arg(short, long = "blocked")]
        blocked: Vec<String>,
    },

    /// Print the active reference data as JSON
    DumpConfig,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let config = load_config(&args)?;
    let provider = StaticNetworkProvider::from_config(&config)
        .context("Reference data failed validation")?;
    let planner = FleetPlanner::new(config.fleet.clone());

    match &args.command {
        Command::Stops => {
            let stops = provider.all_stops();
            emit(&args, &stops, || report::stops(&stops))?;
        }

        Command::Streets { blocked } => {
            let blocked = blocked_set(&provider, blocked);
            let available = provider.available_streets(&blocked);
            emit(&args, &available, || report::streets(&available, &blocked))?;
        }

        Command::Estimate { from, to, blocked } => {
            let blocked = blocked_set(&provider, blocked);
            let trip = RouteTimeEstimator::new(&provider)
                .estimate(from, to, &blocked)
                .with_context(|| format!("Cannot estimate trip {} -> {}", from, to))?;
            if trip.is_alternative {
                log::info!(
                    "Blocked streets on route: {}. Additional time: +{} min",
                    trip.blocked_streets_in_route
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    trip.additional_minutes
                );
            }
            emit(&args, &trip, || report::trip(&trip))?;
        }

        Command::Allocate { priority } => {
            let mut allocations = planner.distribute().context("Fleet allocation failed")?;
            let stats = planner.statistics()?;
            if let Some(key) = priority {
                let tier = PriorityTier::from_key(key)
                    .with_context(|| format!("Unknown priority '{}'", key))?;
                allocations.retain(|a| a.route.priority == tier);
                log::debug!("{} route(s) with priority {}", allocations.len(), tier);
            }
            emit(&args, &allocations, || report::allocations(&allocations, &stats))?;
        }

        Command::Stats => {
            let stats = planner.statistics().context("Fleet allocation failed")?;
            emit(&args, &stats, || report::statistics(&stats))?;
        }

        Command::Analyze { route } => {
            let analysis = planner
                .analyze(route)
                .with_context(|| format!("Cannot analyze route '{}'", route))?;
            log::info!(
                "{} for route {}",
                analysis.recommendation.category.title(),
                analysis.allocation.route
            );
            emit(&args, &analysis, || report::analysis(&analysis))?;
        }

        Command::Timetable { route } => {
            let departures = planner
                .timetable(route)
                .with_context(|| format!("Cannot build timetable for '{}'", route))?;
            let window = &planner.fleet().service;
            emit(&args, &departures, || report::timetable(route, window, &departures))?;
        }

        Command::Nearest { x, y, radius } => {
            let point = Point::new(*x, *y);
            let stops = match radius {
                Some(radius) => provider.stops_within(point, *radius),
                None => provider.nearest_stop(point).into_iter().collect(),
            };
            if stops.is_empty() {
                bail!("No stop found near ({}, {})", x, y);
            }

            let mut found: Vec<report::StopDistance> = stops
                .iter()
                .map(|stop| report::StopDistance {
                    id: stop.id.to_string(),
                    name: stop.name.to_string(),
                    distance: map_distance(point, stop.position),
                })
                .collect();
            found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
            emit(&args, &found, || report::nearest(&found))?;
        }

        Command::Map {
            output,
            from,
            to,
            blocked,
        } => {
            let blocked = blocked_set(&provider, blocked);
            let trip = match (from, to) {
                (Some(from), Some(to)) => Some(
                    RouteTimeEstimator::new(&provider)
                        .estimate(from, to, &blocked)
                        .with_context(|| format!("Cannot estimate trip {} -> {}", from, to))?,
                ),
                _ => None,
            };

            let scene = MapScene::build(&provider, &blocked, trip.as_ref());
            write_scene_geojson(&scene, output).context("Failed to write map GeoJSON")?;
            log::info!("Map written to: {}", output.display());
        }

        Command::DumpConfig => {
            let json = config.to_json_string()?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<NetworkConfig> {
    match &args.config {
        Some(path) => {
            log::info!("Reference data: {}", path.display());
            if !path.exists() {
                bail!("Config file does not exist: {}", path.display());
            }
            NetworkConfig::from_json_file(path)
                .with_context(|| format!("Failed to load reference data from {}", path.display()))
        }
        None => {
            log::debug!("Using built-in Milagro reference data");
            Ok(NetworkConfig::milagro())
        }
    }
}

/// Build the blocked set, warning about names the network does not know
fn blocked_set(provider: &StaticNetworkProvider, names: &[String]) -> BlockedStreetSet {
    let mut blocked = BlockedStreetSet::new();
    for name in names {
        let street = StreetName::new(name);
        if !provider.blockable_streets().contains(&street) {
            log::warn!("'{}' is not a known street; blocking it has no effect", name);
        } else {
            let affected = provider.segments_using(&street);
            log::debug!("'{}' lies on {} segment(s)", name, affected.len());
        }
        if blocked.add(street).is_err() {
            log::warn!("'{}' given more than once", name);
        }
    }
    blocked
}

fn emit<T: Serialize>(args: &Args, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    } else {
        print!("{}", text());
    }
    Ok(())
}
