//! Brewcrawl CLI library.
//!
//! This crate provides the subcommand handlers and output formatting for the
//! brewcrawl command-line tool. `main.rs` only parses arguments and dispatches.

pub mod commands;
pub mod output;
