//! Greedy nearest-neighbour crawl construction.
//!
//! Starting at an origin, the builder repeatedly walks to the closest
//! unvisited location (by shortest-path walking time from the current stop)
//! until nothing else is reachable or the next stop would break a limit.
//! All limits are inclusive and are checked against the totals the tour would
//! have *after* appending the candidate. The result is a heuristic, not an
//! optimal tour.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::location::{normalize_name, LocationId};
use crate::path::{dijkstra, ShortestPaths};
use crate::routing::resolve_location;

/// Minutes spent at each non-exempt stop when no dwell time is configured.
pub const DEFAULT_DWELL_MINUTES: f64 = 30.0;

/// Optional stopping conditions for a tour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TourLimits {
    /// Maximum number of non-origin stops.
    pub max_stops: Option<usize>,
    /// Maximum cumulative walking time, excluding dwell time.
    pub max_walk_time: Option<f64>,
    /// Maximum cumulative elapsed time (walking plus dwell).
    pub time_limit: Option<f64>,
    /// Minutes charged once per non-exempt stop.
    pub dwell_time: f64,
}

impl Default for TourLimits {
    fn default() -> Self {
        Self {
            max_stops: None,
            max_walk_time: None,
            time_limit: None,
            dwell_time: DEFAULT_DWELL_MINUTES,
        }
    }
}

impl TourLimits {
    /// Reject negative or NaN durations. Zero is a valid (restrictive) limit.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("max_walk_time", self.max_walk_time),
            ("time_limit", self.time_limit),
            ("dwell_time", Some(self.dwell_time)),
        ];
        for (limit, value) in checks {
            if let Some(value) = value {
                if value.is_nan() || value < 0.0 {
                    return Err(Error::InvalidLimit { limit, value });
                }
            }
        }
        Ok(())
    }

    /// First limit (in check order) that the tentative totals would exceed.
    fn violated_by(&self, stops: usize, walk_time: f64, elapsed: f64) -> Option<TerminationReason> {
        if self.max_stops.is_some_and(|max| stops > max) {
            return Some(TerminationReason::MaxStops);
        }
        if self.max_walk_time.is_some_and(|max| walk_time > max) {
            return Some(TerminationReason::MaxWalkTime);
        }
        if self.time_limit.is_some_and(|max| elapsed > max) {
            return Some(TerminationReason::TimeLimit);
        }
        None
    }
}

/// Why the builder stopped extending the tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// No unvisited location is reachable from the last stop.
    Exhausted,
    MaxStops,
    MaxWalkTime,
    TimeLimit,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TerminationReason::Exhausted => "no unvisited location reachable",
            TerminationReason::MaxStops => "maximum stops reached",
            TerminationReason::MaxWalkTime => "maximum walking time reached",
            TerminationReason::TimeLimit => "time limit reached",
        };
        f.write_str(value)
    }
}

/// Walk from one stop to the next, possibly through other locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourLeg {
    pub from: LocationId,
    pub to: LocationId,
    pub walk_minutes: f64,
    pub dwell_minutes: f64,
    pub path: Vec<LocationId>,
}

/// Ordered crawl starting at the origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    pub origin: LocationId,
    /// Visited locations in order, origin first.
    pub stops: Vec<LocationId>,
    pub legs: Vec<TourLeg>,
    pub total_walk_time: f64,
    pub total_elapsed_time: f64,
    pub termination: TerminationReason,
}

impl Tour {
    /// Number of non-origin stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }
}

/// Build a crawl from the named origin.
pub fn build_tour(graph: &Graph, origin_name: &str, limits: &TourLimits) -> Result<Tour> {
    let origin = resolve_location(graph, origin_name)?;
    build_tour_from(graph, origin, limits)
}

/// Build a crawl from `origin`.
pub fn build_tour_from(graph: &Graph, origin: LocationId, limits: &TourLimits) -> Result<Tour> {
    limits.validate()?;
    if !graph.contains(origin) {
        return Err(Error::InvalidLocation { id: origin });
    }

    let mut visited = vec![false; graph.len()];
    visited[origin.index()] = true;

    let mut stops = vec![origin];
    let mut legs = Vec::new();
    let mut walk_time = 0.0;
    let mut elapsed = 0.0;
    let mut current = origin;

    let termination = loop {
        let paths = dijkstra(graph, current)?;

        let Some((candidate, distance)) = nearest_unvisited(graph, &paths, &visited) else {
            break TerminationReason::Exhausted;
        };

        let dwell = match graph.location(candidate) {
            Some(location) if location.dwell_exempt => 0.0,
            _ => limits.dwell_time,
        };
        let next_walk = walk_time + distance;
        let next_elapsed = elapsed + distance + dwell;
        let next_stops = stops.len();

        if let Some(reason) = limits.violated_by(next_stops, next_walk, next_elapsed) {
            break reason;
        }

        let Some(path) = paths.path_to(candidate) else {
            return Err(Error::RouteNotFound {
                start: location_label(graph, current),
                goal: location_label(graph, candidate),
            });
        };
        legs.push(TourLeg {
            from: current,
            to: candidate,
            walk_minutes: distance,
            dwell_minutes: dwell,
            path,
        });
        visited[candidate.index()] = true;
        stops.push(candidate);
        walk_time = next_walk;
        elapsed = next_elapsed;
        current = candidate;

        debug!(
            stop = %candidate,
            walk_time,
            elapsed,
            "appended tour stop"
        );
    };

    debug!(reason = %termination, stops = stops.len() - 1, "tour finished");

    Ok(Tour {
        origin,
        stops,
        legs,
        total_walk_time: walk_time,
        total_elapsed_time: elapsed,
        termination,
    })
}

fn location_label(graph: &Graph, id: LocationId) -> String {
    graph
        .location_name(id)
        .map_or_else(|| id.to_string(), str::to_string)
}

/// Closest reachable unvisited location; ties go to the lexicographically
/// smallest normalized name, then the lowest id.
fn nearest_unvisited(
    graph: &Graph,
    paths: &ShortestPaths,
    visited: &[bool],
) -> Option<(LocationId, f64)> {
    paths
        .reachable()
        .filter(|(id, _)| !visited[id.index()])
        .map(|(id, distance)| {
            let key = graph.location_name(id).map(normalize_name).unwrap_or_default();
            (id, distance, key)
        })
        .min_by(|a, b| {
            a.1.total_cmp(&b.1)
                .then_with(|| a.2.cmp(&b.2))
                .then_with(|| a.0.cmp(&b.0))
        })
        .map(|(id, distance, _)| (id, distance))
}
