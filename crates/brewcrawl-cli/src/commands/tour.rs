//! Tour command handler for building a greedy brewery crawl.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use brewcrawl_lib::{build_tour_from, resolve_location, TourLimits, TourSummary};

use crate::commands::load_matrix;
use crate::output::{emit, OutputFormat};

/// Arguments for the tour command.
#[derive(Debug, Clone)]
pub struct TourCommandArgs {
    /// Origin location name.
    pub origin: String,
    /// Maximum number of stops after the origin.
    pub max_stops: Option<usize>,
    /// Maximum cumulative walking minutes.
    pub max_walk_time: Option<f64>,
    /// Maximum cumulative minutes including dwell time.
    pub time_limit: Option<f64>,
    /// Minutes spent at each stop.
    pub dwell_time: f64,
    /// Additional locations that incur no dwell time.
    pub dwell_exempt: Vec<String>,
}

impl TourCommandArgs {
    /// Convert CLI args to library tour limits.
    pub fn to_limits(&self) -> TourLimits {
        TourLimits {
            max_stops: self.max_stops,
            max_walk_time: self.max_walk_time,
            time_limit: self.time_limit,
            dwell_time: self.dwell_time,
        }
    }

    /// The origin followed by every `--dwell-exempt` name.
    pub fn exempt_names(&self) -> Vec<&str> {
        std::iter::once(self.origin.as_str())
            .chain(self.dwell_exempt.iter().map(String::as_str))
            .collect()
    }
}

/// Handle the tour subcommand.
///
/// The origin and every `--dwell-exempt` location are registered as non-dwell
/// waypoints when the graph is built.
pub fn handle_tour_command(
    matrix: &Path,
    format: OutputFormat,
    args: &TourCommandArgs,
) -> Result<()> {
    let graph = load_matrix(matrix)?.to_graph_with_exempt(&args.exempt_names())?;
    let origin = resolve_location(&graph, &args.origin)?;

    let limits = args.to_limits();
    let tour = build_tour_from(&graph, origin, &limits)?;
    info!(
        stops = tour.stop_count(),
        walk_minutes = tour.total_walk_time,
        elapsed_minutes = tour.total_elapsed_time,
        "tour built"
    );

    let summary = TourSummary::from_tour(&graph, &tour, &limits);
    emit(format, &summary, || summary.render_plain())
}
