use std::fmt;

use crate::error::{Error, Result};
use crate::location::{Location, LocationId, LocationRegistry};

/// Directed edge within the walking graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: LocationId,
    /// Walking time in minutes.
    pub weight: f64,
}

/// Weighted directed graph of locations.
///
/// Construction is incremental (locations first, then edges). Once built the
/// graph is only read, so shared references can be handed to concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    registry: LocationRegistry,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location, returning the existing identity for a known name.
    pub fn add_location(&mut self, name: &str) -> LocationId {
        self.add_location_with(name, false)
    }

    /// Register a location whose stops do (or do not) incur dwell time.
    ///
    /// The flag is fixed at registration; re-registering a known name returns
    /// the existing location unchanged.
    pub fn add_location_with(&mut self, name: &str, dwell_exempt: bool) -> LocationId {
        let id = self.registry.register_with(name, dwell_exempt);
        if id.index() == self.adjacency.len() {
            self.adjacency.push(Vec::new());
        }
        id
    }

    /// Add or overwrite the directed edge `from -> to`.
    ///
    /// Self-loops are validated and then dropped.
    pub fn add_edge(&mut self, from: LocationId, to: LocationId, weight: f64) -> Result<()> {
        let from_name = self.name_of(from)?.to_string();
        let to_name = self.name_of(to)?.to_string();

        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                from: from_name,
                to: to_name,
                weight,
            });
        }

        if from == to {
            return Ok(());
        }

        let edges = &mut self.adjacency[from.index()];
        match edges.binary_search_by(|edge| edge.target.cmp(&to)) {
            Ok(position) => edges[position].weight = weight,
            Err(position) => edges.insert(position, Edge { target: to, weight }),
        }
        Ok(())
    }

    /// Name-based variant of [`Graph::add_edge`]; both endpoints must be registered.
    pub fn add_edge_by_name(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        let from_id = self.require(from)?;
        let to_id = self.require(to)?;
        self.add_edge(from_id, to_id, weight)
    }

    /// Outgoing edges of `location`, ordered by target id.
    pub fn neighbours(&self, location: LocationId) -> &[Edge] {
        self.adjacency
            .get(location.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Lookup a location identifier by name.
    pub fn lookup(&self, name: &str) -> Option<LocationId> {
        self.registry.lookup(name)
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.registry.get(id)
    }

    /// Lookup a location name by identifier.
    pub fn location_name(&self, id: LocationId) -> Option<&str> {
        self.registry.get(id).map(|location| location.name.as_str())
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.registry.iter()
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.registry.contains(id)
    }

    /// Weight of the direct edge `from -> to`, if one exists.
    pub fn edge_weight(&self, from: LocationId, to: LocationId) -> Option<f64> {
        let edges = self.neighbours(from);
        edges
            .binary_search_by(|edge| edge.target.cmp(&to))
            .ok()
            .map(|position| edges[position].weight)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    fn name_of(&self, id: LocationId) -> Result<&str> {
        self.location_name(id).ok_or(Error::InvalidLocation { id })
    }

    fn require(&self, name: &str) -> Result<LocationId> {
        self.lookup(name).ok_or_else(|| Error::UnknownLocation {
            name: name.to_string(),
            suggestions: self.registry.fuzzy_matches(name, 3),
        })
    }
}

/// Adjacency listing: every other location per line, `NA` where no direct edge exists.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph:")?;
        for location in self.registry.iter() {
            let connections = self
                .registry
                .iter()
                .filter(|other| other.id != location.id)
                .map(|other| match self.edge_weight(location.id, other.id) {
                    Some(weight) => format!("{}({})", other.name, weight),
                    None => format!("{}(NA)", other.name),
                })
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "{} -> {}", location.name, connections)?;
        }
        Ok(())
    }
}
