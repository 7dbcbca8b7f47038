use thiserror::Error;

use crate::location::LocationId;

/// Convenient result alias for the brewcrawl library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location name could not be found in the graph.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a location identifier was not issued by the graph it is used with.
    #[error("location id {id} is not registered in this graph")]
    InvalidLocation { id: LocationId },

    /// Raised when an edge weight is negative, infinite or not a number.
    #[error("invalid walking time {weight} for edge {from} -> {to}; weights must be finite and non-negative")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// Raised when a tour limit or dwell time is negative or not a number.
    #[error("invalid value {value} for {limit}; limits must be non-negative")]
    InvalidLimit { limit: &'static str, value: f64 },

    /// Raised when no route could be found between two locations.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a computed route plan lacks any locations.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when walking-time matrix input fails validation.
    #[error("invalid walking-time matrix: {message}")]
    MatrixFormat { message: String },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
