//! Walking-time matrix ingestion.
//!
//! The matrix is a CSV table: the header names destination columns (its first
//! cell is ignored), and every data row starts with the source name followed
//! by the walking minutes to each column. Blank cells and `NA`, `N/A` or `-`
//! mean there is no direct edge.
//!
//! Spreadsheet workbooks are not read directly. Export the walking-time sheet
//! as CSV (the location index column becomes the first column and its header
//! cell may hold any label) and load that file instead.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::location::normalize_name;

const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "-"];
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// One directed entry of the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixEntry {
    pub from: String,
    pub to: String,
    pub minutes: f64,
}

/// Location names plus the partial mapping of ordered pairs to walking minutes.
#[derive(Debug, Clone, Default)]
pub struct WalkingMatrix {
    names: Vec<String>,
    entries: Vec<MatrixEntry>,
    source: Option<PathBuf>,
}

impl WalkingMatrix {
    /// Load a walking-time matrix from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if let Some(extension) = path
            .extension()
            .and_then(|extension| extension.to_str())
            .filter(|extension| {
                WORKBOOK_EXTENSIONS
                    .iter()
                    .any(|known| extension.eq_ignore_ascii_case(known))
            })
        {
            return Err(Error::MatrixFormat {
                message: format!(
                    "{} is a .{extension} workbook; export the walking-time sheet as CSV first",
                    path.display()
                ),
            });
        }

        let file = fs::File::open(path)?;
        let mut matrix = Self::from_reader(file)?;
        matrix.source = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            locations = matrix.names.len(),
            edges = matrix.entries.len(),
            "loaded walking-time matrix"
        );
        Ok(matrix)
    }

    /// Load a walking-time matrix from a reader (e.g. file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::MatrixFormat {
                message: format!("failed to read matrix header: {err}"),
            })?
            .clone();

        let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
        if columns.is_empty() {
            return Err(Error::MatrixFormat {
                message: "header row names no locations".to_string(),
            });
        }
        if let Some(position) = columns.iter().position(|name| name.is_empty()) {
            return Err(Error::MatrixFormat {
                message: format!("header column {} has a blank location name", position + 2),
            });
        }

        let mut names = columns.clone();
        let mut entries = Vec::new();
        let mut ignored_diagonal = 0usize;

        for (row_index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = row_index + 2;

            let Some(from) = record.get(0).filter(|name| !name.is_empty()) else {
                if record.iter().all(str::is_empty) {
                    continue;
                }
                return Err(Error::MatrixFormat {
                    message: format!("row {line} has a blank location name"),
                });
            };

            if record.len() > columns.len() + 1 {
                return Err(Error::MatrixFormat {
                    message: format!(
                        "row {line} ({from}) has {} cells but the header names {} locations",
                        record.len() - 1,
                        columns.len()
                    ),
                });
            }

            if !names.iter().any(|name| same_name(name, from)) {
                names.push(from.to_string());
            }

            for (to, cell) in columns.iter().zip(record.iter().skip(1)) {
                let Some(minutes) = parse_cell(cell, line, from, to)? else {
                    continue;
                };
                if same_name(from, to) {
                    ignored_diagonal += usize::from(minutes != 0.0);
                    continue;
                }
                entries.push(MatrixEntry {
                    from: from.to_string(),
                    to: to.clone(),
                    minutes,
                });
            }
        }

        if ignored_diagonal > 0 {
            warn!(
                ignored_diagonal,
                "ignored non-zero self-loop entries on the matrix diagonal"
            );
        }

        Ok(Self {
            names,
            entries,
            source: None,
        })
    }

    /// Location names: header columns first, then row-only names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn entries(&self) -> &[MatrixEntry] {
        &self.entries
    }

    /// File the matrix was loaded from, when it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Build the walking graph: every location first, then every edge.
    pub fn to_graph(&self) -> Result<Graph> {
        self.to_graph_with_exempt::<&str>(&[])
    }

    /// Build the walking graph with the named locations registered as
    /// dwell-exempt waypoints. Every exempt name must appear in the matrix.
    pub fn to_graph_with_exempt<S: AsRef<str>>(&self, exempt: &[S]) -> Result<Graph> {
        let exempt_keys: Vec<String> = exempt
            .iter()
            .map(|name| normalize_name(name.as_ref()))
            .collect();

        let mut graph = Graph::new();
        for name in &self.names {
            let dwell_exempt = exempt_keys.contains(&normalize_name(name));
            graph.add_location_with(name, dwell_exempt);
        }

        for name in exempt {
            let name = name.as_ref();
            if graph.lookup(name).is_none() {
                return Err(Error::UnknownLocation {
                    name: name.trim().to_string(),
                    suggestions: graph.registry().fuzzy_matches(name, 3),
                });
            }
        }

        for entry in &self.entries {
            graph.add_edge_by_name(&entry.from, &entry.to, entry.minutes)?;
        }
        Ok(graph)
    }
}

/// Load a CSV walking-time matrix and build its graph.
pub fn load_graph(path: &Path) -> Result<Graph> {
    WalkingMatrix::from_path(path)?.to_graph()
}

fn same_name(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

fn parse_cell(cell: &str, line: usize, from: &str, to: &str) -> Result<Option<f64>> {
    if MISSING_MARKERS
        .iter()
        .any(|marker| cell.eq_ignore_ascii_case(marker))
    {
        return Ok(None);
    }

    let minutes: f64 = cell.parse().map_err(|_| Error::MatrixFormat {
        message: format!("row {line} ({from}), column {to}: '{cell}' is not a number"),
    })?;

    if !minutes.is_finite() {
        return Err(Error::MatrixFormat {
            message: format!("row {line} ({from}), column {to}: walking time {cell} is not finite"),
        });
    }
    if minutes < 0.0 {
        return Err(Error::MatrixFormat {
            message: format!("row {line} ({from}), column {to}: walking time {cell} is negative"),
        });
    }

    Ok(Some(minutes))
}
