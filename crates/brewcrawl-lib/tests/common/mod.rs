#![allow(dead_code)]

use std::path::PathBuf;

use brewcrawl_lib::{load_graph, Graph, LocationId, WalkingMatrix};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_graph() -> Graph {
    load_graph(&fixtures_dir().join("walking_times.csv")).expect("fixture matrix loads")
}

pub fn fixture_graph_with_exempt(exempt: &[&str]) -> Graph {
    WalkingMatrix::from_path(&fixtures_dir().join("walking_times.csv"))
        .expect("fixture matrix loads")
        .to_graph_with_exempt(exempt)
        .expect("exempt names exist")
}

/// Locations {A, B, C} with A->B=5, B->C=5, A->C=20, plus an isolated D.
pub fn abc_graph() -> Graph {
    let mut graph = Graph::new();
    let a = graph.add_location("A");
    let b = graph.add_location("B");
    let c = graph.add_location("C");
    graph.add_location("D");
    graph.add_edge(a, b, 5.0).unwrap();
    graph.add_edge(b, c, 5.0).unwrap();
    graph.add_edge(a, c, 20.0).unwrap();
    graph
}

pub fn names(graph: &Graph, ids: &[LocationId]) -> Vec<String> {
    ids.iter()
        .map(|id| graph.location_name(*id).expect("known id").to_string())
        .collect()
}

/// Small deterministic xorshift generator so property checks stay reproducible.
pub struct Xorshift(u64);

impl Xorshift {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// Random directed graph with `size` locations, roughly `density`% of ordered
/// pairs connected, integer weights in 0..=20 (zero weights included).
pub fn random_graph(rng: &mut Xorshift, size: usize, density: u64) -> Graph {
    let mut graph = Graph::new();
    let ids: Vec<LocationId> = (0..size)
        .map(|index| graph.add_location(&format!("L{index}")))
        .collect();
    for &from in &ids {
        for &to in &ids {
            if from != to && rng.below(100) < density {
                graph.add_edge(from, to, rng.below(21) as f64).unwrap();
            }
        }
    }
    graph
}

/// Minimum path weight from `from` to `to` over all simple directed paths.
pub fn brute_force_distance(graph: &Graph, from: LocationId, to: LocationId) -> Option<f64> {
    fn walk(
        graph: &Graph,
        current: LocationId,
        goal: LocationId,
        cost: f64,
        on_path: &mut Vec<bool>,
        best: &mut Option<f64>,
    ) {
        if current == goal {
            if best.map_or(true, |value| cost < value) {
                *best = Some(cost);
            }
            return;
        }
        for edge in graph.neighbours(current) {
            if on_path[edge.target.index()] {
                continue;
            }
            on_path[edge.target.index()] = true;
            walk(graph, edge.target, goal, cost + edge.weight, on_path, best);
            on_path[edge.target.index()] = false;
        }
    }

    let mut on_path = vec![false; graph.len()];
    on_path[from.index()] = true;
    let mut best = None;
    walk(graph, from, to, 0.0, &mut on_path, &mut best);
    best
}
