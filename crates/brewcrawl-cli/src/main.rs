use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use brewcrawl_cli::commands::route::{handle_route_command, RouteCommandArgs};
use brewcrawl_cli::commands::show::handle_show_command;
use brewcrawl_cli::commands::tour::{handle_tour_command, TourCommandArgs};
use brewcrawl_cli::output::OutputFormat;
use brewcrawl_lib::DEFAULT_DWELL_MINUTES;

#[derive(Parser, Debug)]
#[command(author, version, about = "Brewery walking routes and crawl planner")]
struct Cli {
    /// Walking-time matrix (CSV) to load.
    #[arg(long, global = true, default_value = "walking_times.csv")]
    matrix: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest walk between two locations.
    Route {
        /// Starting location name.
        #[arg(long = "from")]
        from: String,
        /// Destination location name.
        #[arg(long = "to")]
        to: String,
    },
    /// Build a greedy nearest-neighbour crawl from an origin.
    Tour {
        /// Origin location name. The origin never incurs dwell time.
        #[arg(long)]
        origin: String,
        /// Maximum number of stops after the origin.
        #[arg(long)]
        max_stops: Option<usize>,
        /// Maximum cumulative walking minutes.
        #[arg(long)]
        max_walk_time: Option<f64>,
        /// Maximum cumulative minutes, walking plus dwell time.
        #[arg(long)]
        time_limit: Option<f64>,
        /// Minutes spent at each stop.
        #[arg(long, default_value_t = DEFAULT_DWELL_MINUTES)]
        dwell_time: f64,
        /// Location that incurs no dwell time (repeatable).
        #[arg(long = "dwell-exempt")]
        dwell_exempt: Vec<String>,
    },
    /// Print the loaded graph as an adjacency listing.
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Route { from, to } => {
            handle_route_command(&cli.matrix, cli.format, &RouteCommandArgs { from, to })
        }
        Command::Tour {
            origin,
            max_stops,
            max_walk_time,
            time_limit,
            dwell_time,
            dwell_exempt,
        } => handle_tour_command(
            &cli.matrix,
            cli.format,
            &TourCommandArgs {
                origin,
                max_stops,
                max_walk_time,
                time_limit,
                dwell_time,
                dwell_exempt,
            },
        ),
        Command::Show => handle_show_command(&cli.matrix, cli.format),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
