use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::location::LocationId;
use crate::routing::RoutePlan;
use crate::tour::{TerminationReason, Tour, TourLimits};

/// Endpoint of a route or tour.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteEndpoint {
    fn new(graph: &Graph, id: LocationId) -> Self {
        Self {
            id,
            name: graph.location_name(id).map(str::to_string),
        }
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Location passed while walking a route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cumulative walking minutes on arrival.
    pub minutes: f64,
}

impl RouteStep {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Structured representation of a shortest route that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub hops: usize,
    pub total_minutes: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved names and
    /// cumulative arrival times.
    pub fn from_plan(graph: &Graph, plan: &RoutePlan) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let mut minutes = 0.0;
        let mut steps = Vec::with_capacity(plan.steps.len());
        for (index, id) in plan.steps.iter().copied().enumerate() {
            if index > 0 {
                minutes += graph
                    .edge_weight(plan.steps[index - 1], id)
                    .unwrap_or_default();
            }
            steps.push(RouteStep {
                index,
                id,
                name: graph.location_name(id).map(str::to_string),
                minutes,
            });
        }

        Ok(Self {
            hops: plan.hop_count(),
            total_minutes: plan.total_minutes,
            start: RouteEndpoint::new(graph, plan.start),
            goal: RouteEndpoint::new(graph, plan.goal),
            steps,
        })
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {} min walking)",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            format_minutes(self.total_minutes)
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} (+{} min)",
                step.index,
                step.display_name(),
                format_minutes(step.minutes)
            );
        }
        buffer
    }
}

/// One crawl stop with running totals.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TourStop {
    pub index: usize,
    pub id: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub walk_minutes: f64,
    pub dwell_minutes: f64,
    /// Locations walked through on the way from the previous stop.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub via: Vec<String>,
    pub cumulative_walk: f64,
    pub cumulative_elapsed: f64,
}

impl TourStop {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Structured representation of a crawl tour.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TourSummary {
    pub origin: RouteEndpoint,
    pub limits: TourLimits,
    pub stop_count: usize,
    pub total_walk_time: f64,
    pub total_elapsed_time: f64,
    pub termination: TerminationReason,
    pub stops: Vec<TourStop>,
}

impl TourSummary {
    pub fn from_tour(graph: &Graph, tour: &Tour, limits: &TourLimits) -> Self {
        let name = |id: LocationId| graph.location_name(id).map(str::to_string);

        let mut stops = vec![TourStop {
            index: 0,
            id: tour.origin,
            name: name(tour.origin),
            walk_minutes: 0.0,
            dwell_minutes: 0.0,
            via: Vec::new(),
            cumulative_walk: 0.0,
            cumulative_elapsed: 0.0,
        }];

        let mut cumulative_walk = 0.0;
        let mut cumulative_elapsed = 0.0;
        for (index, leg) in tour.legs.iter().enumerate() {
            cumulative_walk += leg.walk_minutes;
            cumulative_elapsed += leg.walk_minutes + leg.dwell_minutes;
            let via = leg
                .path
                .iter()
                .skip(1)
                .take(leg.path.len().saturating_sub(2))
                .filter_map(|id| graph.location_name(*id).map(str::to_string))
                .collect();
            stops.push(TourStop {
                index: index + 1,
                id: leg.to,
                name: name(leg.to),
                walk_minutes: leg.walk_minutes,
                dwell_minutes: leg.dwell_minutes,
                via,
                cumulative_walk,
                cumulative_elapsed,
            });
        }

        Self {
            origin: RouteEndpoint::new(graph, tour.origin),
            limits: *limits,
            stop_count: tour.stop_count(),
            total_walk_time: tour.total_walk_time,
            total_elapsed_time: tour.total_elapsed_time,
            termination: tour.termination,
            stops,
        }
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Tour from {}: {} stops, {} min walking, {} min total ({})",
            self.origin.display_name(),
            self.stop_count,
            format_minutes(self.total_walk_time),
            format_minutes(self.total_elapsed_time),
            self.termination
        );
        for stop in &self.stops {
            if stop.index == 0 {
                let _ = writeln!(buffer, "{:>3}: {} (start)", stop.index, stop.display_name());
                continue;
            }
            let _ = write!(
                buffer,
                "{:>3}: {} (walk {} min, stay {} min, elapsed {} min)",
                stop.index,
                stop.display_name(),
                format_minutes(stop.walk_minutes),
                format_minutes(stop.dwell_minutes),
                format_minutes(stop.cumulative_elapsed)
            );
            if !stop.via.is_empty() {
                let _ = write!(buffer, " via {}", stop.via.join(", "));
            }
            buffer.push('\n');
        }
        buffer
    }
}

/// Whole minutes print without a fractional part.
fn format_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{minutes:.0}")
    } else {
        format!("{minutes:.1}")
    }
}
