use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use travelmap::logging::initialize_logging;
use travelmap::{
    LocationCatalog, MapController, NoDelay, Region, ResolutionQuality, RouteResolver,
    RouteResult, RouteSession, TravelMapConfig, TravelMapError,
};

#[derive(Parser, Debug)]
#[command(
    name = "travelmap",
    author,
    version,
    about = "TravelMap - browse destinations and estimate straight-line routes between them",
    long_about = None
)]
struct Cli {
    #[arg(short, long, global = true, help = "Path to a TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog destinations, grouped by region
    Destinations {
        #[arg(long, help = "Only show one region (usa, europe, asia, middle-east, oceania)")]
        region: Option<Region>,
    },

    /// Search destinations by name
    Search { query: String },

    /// Estimate a route between two places
    Route {
        start: String,
        end: String,

        #[arg(long, help = "Average speed in km/h (default: 80)")]
        speed: Option<f64>,

        #[arg(long, help = "Skip the simulated calculation delay")]
        no_delay: bool,

        #[arg(long, help = "Print the route as JSON")]
        json: bool,
    },

    /// Center the map on a destination and route to it from a start place
    Goto {
        destination: String,

        #[arg(long, default_value = "", help = "Start place to route from")]
        from: String,

        #[arg(long, help = "Average speed in km/h (default: 80)")]
        speed: Option<f64>,

        #[arg(long, help = "Skip the simulated calculation delay")]
        no_delay: bool,

        #[arg(long, help = "Print the route as JSON")]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<TravelMapError>() {
                Some(travel_err) => eprintln!("Error: {}", travel_err.user_message()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = TravelMapConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;

    if let Command::Route { speed: Some(speed), .. } | Command::Goto { speed: Some(speed), .. } =
        &cli.command
    {
        config.routing.average_speed_kmh = *speed;
        config.validate()?;
    }

    initialize_logging(&config.logging, cli.verbose);
    tracing::debug!(
        "Using config from: {}",
        cli.config
            .as_ref()
            .map(|p| p.display().to_string())
            .or_else(|| TravelMapConfig::get_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string())
    );

    let catalog = LocationCatalog::new();

    match cli.command {
        Command::Destinations { region } => {
            print_destinations(&catalog, region);
            Ok(())
        }
        Command::Search { query } => {
            let hits = catalog.search(&query)?;
            match hits.split_first() {
                Some((first, rest)) => {
                    println!("Found destination: {}", first.name);
                    for other in rest {
                        println!("Also matching: {}", other.name);
                    }
                }
                None => println!(
                    "Destination not found. Try searching for popular cities like New York, Paris, Tokyo, etc."
                ),
            }
            Ok(())
        }
        Command::Route {
            start,
            end,
            no_delay,
            json,
            ..
        } => {
            let session = new_session(&catalog, &config);
            let route = if no_delay {
                session.with_delay(NoDelay).calculate(&start, &end).await?
            } else {
                session.calculate(&start, &end).await?
            };
            print_route(&route, json)
        }
        Command::Goto {
            destination,
            from,
            no_delay,
            json,
            ..
        } => {
            let picked = catalog
                .get(&destination)
                .ok_or_else(|| TravelMapError::location_not_found(destination.as_str()))?;
            let session = new_session(&catalog, &config);
            let route = if no_delay {
                session
                    .with_delay(NoDelay)
                    .route_to_destination(&from, picked)
                    .await?
            } else {
                session.route_to_destination(&from, picked).await?
            };

            match route {
                Some(route) => print_route(&route, json),
                None => {
                    println!(
                        "Centered map on {} ({})",
                        picked.name,
                        picked.coordinate.format_coordinates()
                    );
                    println!("{}", picked.description);
                    Ok(())
                }
            }
        }
    }
}

fn new_session(catalog: &LocationCatalog, config: &TravelMapConfig) -> RouteSession<MapController> {
    let mut map = MapController::new(&config.map);
    map.populate(catalog);
    let resolver = RouteResolver::new(*catalog, &config.routing);
    RouteSession::new(resolver, &config.routing, map)
}

fn print_destinations(catalog: &LocationCatalog, only: Option<Region>) {
    for region in Region::ALL {
        if only.is_some_and(|wanted| wanted != region) {
            continue;
        }
        println!("{region}");
        for destination in catalog.by_region(region) {
            println!(
                "  {:<14} {:>9.4}, {:>9.4}  {}",
                destination.name,
                destination.coordinate.latitude,
                destination.coordinate.longitude,
                destination.description
            );
        }
    }
}

fn print_route(route: &RouteResult, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(route).context("Failed to serialize route")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Route: {} -> {}", route.start_label(), route.end_label());
    println!("  Distance:    {}", route.distance_text());
    println!("  ETA:         {}", route.eta());
    println!("  Travel mode: {}", route.travel_mode());
    println!("  Start:       {}", route.start().format_coordinates());
    println!("  Destination: {}", route.end().format_coordinates());
    if route.quality() == ResolutionQuality::Fallback {
        println!("Note: a place was not found in the catalog, showing a demo route instead.");
    }
    Ok(())
}
