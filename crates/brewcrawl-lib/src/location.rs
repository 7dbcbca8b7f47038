//! Location registry: the set of named locations and name-to-identity lookup.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Similarity floor for fuzzy name suggestions (Jaro-Winkler, 0.0..=1.0).
const MIN_SUGGESTION_SIMILARITY: f64 = 0.75;

/// Stable identity of a registered location.
///
/// Identifiers are dense indices issued in registration order, so they double
/// as offsets into per-location tables such as Dijkstra distance vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LocationId(usize);

impl LocationId {
    /// Index of this location within its registry.
    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named node in the walking network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub id: LocationId,
    /// Display name (trimmed, internal whitespace collapsed, original casing).
    pub name: String,
    /// Stops at this location do not incur dwell time during a tour.
    pub dwell_exempt: bool,
}

/// Identity key for a location name: trimmed, whitespace-collapsed, lowercase.
pub fn normalize_name(name: &str) -> String {
    collapse_whitespace(name).to_lowercase()
}

fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Registry of distinct locations keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    locations: Vec<Location>,
    by_name: HashMap<String, LocationId>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, returning the existing identity when the normalized
    /// name is already known.
    pub fn register(&mut self, name: &str) -> LocationId {
        self.register_with(name, false)
    }

    /// Register `name` with its dwell exemption. A name that is already known
    /// keeps the location (and flag) it was first registered with.
    pub fn register_with(&mut self, name: &str, dwell_exempt: bool) -> LocationId {
        let key = normalize_name(name);
        if let Some(&id) = self.by_name.get(&key) {
            return id;
        }

        let id = LocationId(self.locations.len());
        self.locations.push(Location {
            id,
            name: collapse_whitespace(name),
            dwell_exempt,
        });
        self.by_name.insert(key, id);
        id
    }

    /// Lookup a location identifier by name (case- and whitespace-insensitive).
    pub fn lookup(&self, name: &str) -> Option<LocationId> {
        self.by_name.get(&normalize_name(name)).copied()
    }

    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.0)
    }

    pub fn contains(&self, id: LocationId) -> bool {
        id.0 < self.locations.len()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Locations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Return up to `limit` registered display names that closely resemble `name`,
    /// best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let query = normalize_name(name);
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .iter()
            .map(|location| {
                let score = strsim::jaro_winkler(&query, &normalize_name(&location.name));
                (score, location.name.as_str())
            })
            .filter(|(score, _)| *score >= MIN_SUGGESTION_SIMILARITY)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_collapses_and_lowercases() {
        assert_eq!(normalize_name("  Rising   Tide\t"), "rising tide");
    }

    #[test]
    fn register_is_idempotent_by_normalized_name() {
        let mut registry = LocationRegistry::new();
        let first = registry.register("Oxbow Blending");
        let second = registry.register("  oxbow   BLENDING ");
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(first).unwrap().name, "Oxbow Blending");
    }

    #[test]
    fn first_registration_fixes_dwell_exemption() {
        let mut registry = LocationRegistry::new();
        let origin = registry.register_with("Roux Institute", true);
        let again = registry.register("roux institute");
        assert_eq!(origin, again);
        assert!(registry.get(origin).unwrap().dwell_exempt);

        let stop = registry.register("Rising Tide");
        registry.register_with("Rising Tide", true);
        assert!(!registry.get(stop).unwrap().dwell_exempt);
    }

    #[test]
    fn ids_are_issued_in_registration_order() {
        let mut registry = LocationRegistry::new();
        let a = registry.register("A");
        let b = registry.register("B");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert!(registry.contains(b));
        assert_eq!(registry.lookup("b"), Some(b));
        assert_eq!(registry.lookup("C"), None);
    }

    #[test]
    fn fuzzy_matches_suggest_close_names_and_respect_limit() {
        let mut registry = LocationRegistry::new();
        registry.register("Oxbow Blending");
        registry.register("Bissell Brothers");
        registry.register("Rising Tide");

        let matches = registry.fuzzy_matches("Oxbow Blendng", 3);
        assert_eq!(matches.first().map(String::as_str), Some("Oxbow Blending"));

        assert!(registry.fuzzy_matches("Rising", 0).is_empty());
        assert!(registry.fuzzy_matches("zzzzzz", 3).is_empty());
    }
}
