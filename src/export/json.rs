//! JSON export implementation.
//!
//! Exports traversal results in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use crate::graph::Edge;
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable cycle info for JSON output.
#[derive(Serialize)]
struct JsonCycle<'a> {
    packages: &'a [String],
    path: String,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    packages: usize,
    edges: usize,
    cycles: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    root: &'a str,
    max_depth: usize,
    summary: JsonSummary,
    edges: &'a [Edge],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    circular_dependencies: Vec<JsonCycle<'a>>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let circular_dependencies: Vec<JsonCycle> = data
            .cycles
            .iter()
            .map(|c| JsonCycle {
                packages: &c.nodes,
                path: c.cycle_path(),
            })
            .collect();

        let export = JsonExport {
            root: &data.root,
            max_depth: data.max_depth,
            summary: JsonSummary {
                packages: data.package_count,
                edges: data.edges.len(),
                cycles: data.cycles.len(),
            },
            edges: &data.edges,
            circular_dependencies,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
