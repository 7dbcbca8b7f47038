//! Route command handler for computing the shortest walk between two locations.

use std::path::Path;

use anyhow::Result;

use brewcrawl_lib::{shortest_path, Error as RouteError, RouteSummary};

use crate::commands::load_matrix_graph;
use crate::output::{emit, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting location name.
    pub from: String,
    /// Destination location name.
    pub to: String,
}

/// Handle the route subcommand.
///
/// An unreachable destination is reported as an error so the process exits
/// non-zero.
pub fn handle_route_command(
    matrix: &Path,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let graph = load_matrix_graph(matrix)?;

    let plan = shortest_path(&graph, &args.from, &args.to)?.ok_or_else(|| {
        RouteError::RouteNotFound {
            start: args.from.clone(),
            goal: args.to.clone(),
        }
    })?;

    let summary = RouteSummary::from_plan(&graph, &plan)?;
    emit(format, &summary, || summary.render_plain())
}
