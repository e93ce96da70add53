//! PlantUML export implementation.
//!
//! The script is a `@startuml` line, one `parent --> child` line per edge
//! in sequence order, and a closing `@enduml` with no trailing newline.
//! Names are written verbatim; a name containing `" --> "` produces a
//! script the renderer will misread.

use super::{ExportData, Exporter};
use crate::graph::Edge;
use std::io::{self, Write};

const HEADER: &str = "@startuml";
const TRAILER: &str = "@enduml";

/// PlantUML exporter implementation.
pub struct PlantUmlExporter;

impl Exporter for PlantUmlExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writer.write_all(render_script(&data.edges).as_bytes())
    }
}

/// Renders an edge sequence as a PlantUML script.
///
/// # Example
///
/// ```
/// use pipscope::export::render_script;
/// use pipscope::graph::Edge;
///
/// let script = render_script(&[Edge::new("requests", "idna")]);
/// assert_eq!(script, "@startuml\nrequests --> idna\n@enduml");
/// ```
pub fn render_script(edges: &[Edge]) -> String {
    let mut script = String::with_capacity(HEADER.len() + TRAILER.len() + 1);
    script.push_str(HEADER);
    script.push('\n');
    for edge in edges {
        script.push_str(&edge.to_string());
        script.push('\n');
    }
    script.push_str(TRAILER);
    script
}
