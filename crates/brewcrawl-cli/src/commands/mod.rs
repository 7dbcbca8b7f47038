// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod route;
pub mod show;
pub mod tour;

use std::path::Path;

use anyhow::{Context, Result};

use brewcrawl_lib::{Graph, WalkingMatrix};

/// Read the walking-time matrix without building a graph.
pub fn load_matrix(matrix: &Path) -> Result<WalkingMatrix> {
    WalkingMatrix::from_path(matrix)
        .with_context(|| format!("failed to load walking-time matrix from {}", matrix.display()))
}

/// Load the walking-time matrix and build its graph.
pub fn load_matrix_graph(matrix: &Path) -> Result<Graph> {
    load_matrix(matrix)?
        .to_graph()
        .with_context(|| format!("failed to build graph from {}", matrix.display()))
}
