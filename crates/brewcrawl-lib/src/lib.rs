//! Brewcrawl library entry points.
//!
//! This crate holds the walking-time graph of a brewery cluster, exact
//! shortest-path queries over it, and the greedy constrained tour builder.
//! Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod location;
pub mod matrix;
pub mod output;
pub mod path;
pub mod routing;
pub mod tour;

pub use error::{Error, Result};
pub use graph::{Edge, Graph};
pub use location::{normalize_name, Location, LocationId, LocationRegistry};
pub use matrix::{load_graph, MatrixEntry, WalkingMatrix};
pub use output::{RouteEndpoint, RouteStep, RouteSummary, TourStop, TourSummary};
pub use path::{dijkstra, ShortestPaths};
pub use routing::{plan_route, resolve_location, shortest_path, RoutePlan, RouteRequest};
pub use tour::{
    build_tour, build_tour_from, TerminationReason, Tour, TourLeg, TourLimits,
    DEFAULT_DWELL_MINUTES,
};
