//! Graph module for dependency discovery and analysis.
//!
//! [`build_graph`] walks a [`MetadataSource`](crate::source::MetadataSource)
//! and records every declared dependency as an [`Edge`]. The resulting
//! sequence can be loaded into a [`DependencyGraph`] for summaries and
//! cycle detection.
//!
//! # Example
//!
//! ```rust
//! use pipscope::graph::{build_graph, DependencyGraph, DEFAULT_MAX_DEPTH};
//! use pipscope::source::StaticSource;
//!
//! let source = StaticSource::new()
//!     .with_package("a", ["b"])
//!     .with_package("b", ["a"]);
//!
//! let edges = build_graph(&source, "a", DEFAULT_MAX_DEPTH).unwrap();
//! let graph = DependencyGraph::from_edges("a", &edges);
//!
//! assert_eq!(edges.len(), 2);
//! assert!(graph.has_cycles());
//! ```

mod builder;
mod dependency_graph;

pub use builder::{build_graph, Edge, EdgeSequence, DEFAULT_MAX_DEPTH};
pub use dependency_graph::{CycleInfo, DependencyGraph, DependencyNode};
