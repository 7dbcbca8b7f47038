//! Show command handler: dump the loaded graph as an adjacency listing.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use brewcrawl_lib::Graph;

use crate::commands::load_matrix_graph;
use crate::output::{emit, OutputFormat};

#[derive(Debug, Serialize)]
struct GraphListing {
    locations: Vec<LocationListing>,
}

#[derive(Debug, Serialize)]
struct LocationListing {
    name: String,
    edges: Vec<EdgeListing>,
}

#[derive(Debug, Serialize)]
struct EdgeListing {
    to: String,
    minutes: f64,
}

impl GraphListing {
    fn from_graph(graph: &Graph) -> Self {
        let locations = graph
            .locations()
            .map(|location| LocationListing {
                name: location.name.clone(),
                edges: graph
                    .neighbours(location.id)
                    .iter()
                    .filter_map(|edge| {
                        graph.location_name(edge.target).map(|to| EdgeListing {
                            to: to.to_string(),
                            minutes: edge.weight,
                        })
                    })
                    .collect(),
            })
            .collect();
        Self { locations }
    }
}

/// Handle the show subcommand.
pub fn handle_show_command(matrix: &Path, format: OutputFormat) -> Result<()> {
    let graph = load_matrix_graph(matrix)?;
    let listing = GraphListing::from_graph(&graph);
    emit(format, &listing, || graph.to_string())
}
