//! Point-to-point route queries by location name.
//!
//! ```ignore
//! use brewcrawl_lib::{load_graph, shortest_path};
//!
//! let graph = load_graph("docs/fixtures/walking_times.csv".as_ref())?;
//! match shortest_path(&graph, "Roux Institute", "Foundation Brewing")? {
//!     Some(plan) => println!("{} minutes", plan.total_minutes),
//!     None => println!("unreachable"),
//! }
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::location::LocationId;
use crate::path::dijkstra;

/// High-level route request between two named locations.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
        }
    }
}

/// Shortest walking route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub start: LocationId,
    pub goal: LocationId,
    pub steps: Vec<LocationId>,
    /// Summed walking time of every traversed edge, in minutes.
    pub total_minutes: f64,
}

impl RoutePlan {
    /// Number of edges walked.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Resolve a location name, suggesting close matches when it is unknown.
pub fn resolve_location(graph: &Graph, name: &str) -> Result<LocationId> {
    graph.lookup(name).ok_or_else(|| Error::UnknownLocation {
        name: name.trim().to_string(),
        suggestions: graph.registry().fuzzy_matches(name, 3),
    })
}

/// Compute the shortest walking route between two named locations.
///
/// `Ok(None)` means both locations exist but `dest_name` cannot be reached
/// from `source_name`.
pub fn shortest_path(
    graph: &Graph,
    source_name: &str,
    dest_name: &str,
) -> Result<Option<RoutePlan>> {
    let start = resolve_location(graph, source_name)?;
    let goal = resolve_location(graph, dest_name)?;

    let paths = dijkstra(graph, start)?;
    let Some(total_minutes) = paths.distance(goal) else {
        debug!(start = %start, goal = %goal, "goal unreachable");
        return Ok(None);
    };

    // A finite distance always has a predecessor chain back to the source.
    let Some(steps) = paths.path_to(goal) else {
        return Ok(None);
    };

    Ok(Some(RoutePlan {
        start,
        goal,
        steps,
        total_minutes,
    }))
}

/// Request-based variant of [`shortest_path`] that treats an unreachable goal as an error.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    shortest_path(graph, &request.start, &request.goal)?.ok_or_else(|| Error::RouteNotFound {
        start: request.start.clone(),
        goal: request.goal.clone(),
    })
}
