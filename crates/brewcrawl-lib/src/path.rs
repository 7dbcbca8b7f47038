use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::location::LocationId;

/// Single-source shortest-path result: distance and predecessor per location.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    source: LocationId,
    distances: Vec<f64>,
    predecessors: Vec<Option<LocationId>>,
}

impl ShortestPaths {
    pub fn source(&self) -> LocationId {
        self.source
    }

    /// Shortest walking time from the source, or `None` when unreachable.
    pub fn distance(&self, location: LocationId) -> Option<f64> {
        self.distances
            .get(location.index())
            .copied()
            .filter(|distance| distance.is_finite())
    }

    /// Immediate predecessor on the shortest path. Absent for the source and
    /// for unreachable locations.
    pub fn predecessor(&self, location: LocationId) -> Option<LocationId> {
        self.predecessors.get(location.index()).copied().flatten()
    }

    pub fn is_reachable(&self, location: LocationId) -> bool {
        self.distance(location).is_some()
    }

    /// Reachable locations with their distances, in id order.
    pub fn reachable(&self) -> impl Iterator<Item = (LocationId, f64)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter(|(_, distance)| distance.is_finite())
            .map(|(index, distance)| (LocationId::from_index(index), *distance))
    }

    /// Follow predecessor links back from `goal`.
    ///
    /// Returns `None` when `goal` is unreachable. The source itself yields the
    /// single-element path `[source]`.
    pub fn path_to(&self, goal: LocationId) -> Option<Vec<LocationId>> {
        if !self.is_reachable(goal) {
            return None;
        }

        let mut path = vec![goal];
        let mut current = goal;
        while current != self.source {
            current = self.predecessor(current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Run Dijkstra's algorithm from `source` over the whole graph.
///
/// Weights are non-negative by construction. Stale frontier entries are
/// discarded on extraction once their location has been settled.
pub fn dijkstra(graph: &Graph, source: LocationId) -> Result<ShortestPaths> {
    if !graph.contains(source) {
        return Err(Error::InvalidLocation { id: source });
    }

    let count = graph.len();
    let mut distances = vec![f64::INFINITY; count];
    let mut predecessors: Vec<Option<LocationId>> = vec![None; count];
    let mut settled = vec![false; count];
    let mut queue = BinaryHeap::new();

    distances[source.index()] = 0.0;
    queue.push(QueueEntry::new(source, 0.0));

    let mut settled_count = 0usize;
    while let Some(entry) = queue.pop() {
        let current = entry.node;
        if settled[current.index()] {
            continue;
        }
        settled[current.index()] = true;
        settled_count += 1;

        let current_distance = distances[current.index()];
        for edge in graph.neighbours(current) {
            let next = edge.target;
            let next_cost = current_distance + edge.weight;
            if next_cost < distances[next.index()] {
                distances[next.index()] = next_cost;
                predecessors[next.index()] = Some(current);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    debug!(source = %source, settled = settled_count, "dijkstra finished");

    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
    })
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: LocationId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: LocationId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
