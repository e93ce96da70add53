//! Export functionality for traversal results.
//!
//! This module provides exporters for writing a discovered edge sequence
//! as a PlantUML diagram script or as JSON.

pub mod json;
pub mod plantuml;

pub use plantuml::render_script;

use crate::graph::{CycleInfo, DependencyGraph, Edge};
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// PlantUML script - input for the diagram renderer
    #[default]
    PlantUml,
    /// JSON format - machine-readable, full data
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plantuml" | "puml" => Ok(ExportFormat::PlantUml),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: plantuml, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::PlantUml => write!(f, "plantuml"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Data container for export operations.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Package the traversal started from
    pub root: String,
    /// Depth bound the traversal ran with
    pub max_depth: usize,
    /// Discovered edges, in discovery order
    pub edges: Vec<Edge>,
    /// Number of distinct packages, root included
    pub package_count: usize,
    /// Detected circular dependencies
    pub cycles: Vec<CycleInfo>,
}

impl ExportData {
    /// Create export data from a traversal result.
    pub fn new(root: impl Into<String>, max_depth: usize, edges: Vec<Edge>) -> Self {
        let root = root.into();
        let graph = DependencyGraph::from_edges(&root, &edges);

        Self {
            package_count: graph.node_count(),
            cycles: graph.get_cycle_details(),
            root,
            max_depth,
            edges,
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::PlantUml => plantuml::PlantUmlExporter.export(data, writer),
        ExportFormat::Json => json::JsonExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
