use std::time::Duration;

use clap::{Parser, Subcommand};
use cli::{
    DEFAULT_API_ROOT,
    client::HttpRouteService,
    finder::RouteFinder,
    panel::{render_catalog, render_route},
};
use planner::ViewportConfig;
use shared::Criterion;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Find LATAM airport routes against the route service"
)]
struct Args {
    /// Root URL of the route service (serves /airports and /route)
    #[arg(long, env = "ROUTE_API_ROOT", default_value = DEFAULT_API_ROOT)]
    api_root: String,

    /// Padding in degrees added around the route when framing the map
    #[arg(long, default_value_t = 1.0)]
    padding: f64,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the airport catalog sorted by code
    Airports,
    /// Request a route between two airports
    Route {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        /// Cost criterion: km or horas
        #[arg(long, default_value = "km", value_parser = parse_criterion)]
        criterion: Criterion,
    },
}

fn parse_criterion(value: &str) -> Result<Criterion, String> {
    Criterion::from_wire(value)
        .ok_or_else(|| format!("unknown criterion {value:?}, expected km or horas"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_finder=info,cli=info,planner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let service = HttpRouteService::new(&args.api_root, Duration::from_secs(args.timeout_secs))?;
    tracing::info!("using route service at {}", service.api_root());

    let mut finder = RouteFinder::start(
        service,
        ViewportConfig {
            padding_deg: args.padding,
        },
    )
    .await;

    match args.command {
        Command::Airports => println!("{}", render_catalog(finder.registry())),
        Command::Route {
            origin,
            destination,
            criterion,
        } => {
            finder.select(&origin, &destination, criterion)?;
            let view = finder.submit().await?;
            println!("{}", render_route(&view));
        }
    }

    Ok(())
}
