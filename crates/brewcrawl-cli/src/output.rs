//! Output format selection for command results.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write either the rendered text or the JSON form of `value` to stdout.
pub fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(value).context("failed to serialise output")?;
            json.push('\n');
            json
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(rendered.as_bytes())
        .context("failed to write output")?;
    Ok(())
}
