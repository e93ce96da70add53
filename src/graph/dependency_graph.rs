//! Dependency graph implementation using petgraph.
//!
//! Turns a discovered edge sequence into a directed graph so the result of
//! a traversal can be summarized: package counts, distances from the root,
//! and circular declarations.

use petgraph::algo::{dijkstra, is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use super::Edge;

/// A package in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    /// Package name, exactly as reported by the metadata source
    pub name: String,
    /// Hops from the root, root = 1. `None` when unreachable from the root.
    pub depth: Option<usize>,
}

impl DependencyNode {
    /// Creates a node with no known depth.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depth: None,
        }
    }
}

/// A directed graph of packages, edges pointing from dependent to dependency.
///
/// Parallel edges are kept, mirroring the edge sequence the graph was
/// built from.
///
/// # Example
///
/// ```rust
/// use pipscope::graph::{DependencyGraph, Edge};
///
/// let edges = vec![
///     Edge::new("flask", "jinja2"),
///     Edge::new("jinja2", "markupsafe"),
/// ];
/// let graph = DependencyGraph::from_edges("flask", &edges);
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.get_node("markupsafe").unwrap().depth, Some(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<DependencyNode, ()>,
    /// Maps package names to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Creates a new empty dependency graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a traversal result.
    ///
    /// The root is always present, even when it has no edges. Node depths
    /// are shortest hop counts from the root, which can be smaller than
    /// the depth at which the traversal first met a package.
    pub fn from_edges(root: &str, edges: &[Edge]) -> Self {
        let mut graph = Self::new();
        let root_idx = graph.add_package(root);

        for edge in edges {
            let from = graph.add_package(&edge.parent);
            let to = graph.add_package(&edge.child);
            graph.graph.add_edge(from, to, ());
        }

        let distances = dijkstra(&graph.graph, root_idx, None, |_| 1usize);
        for (idx, hops) in distances {
            graph.graph[idx].depth = Some(hops + 1);
        }

        graph
    }

    /// Adds a package, returning the existing index if it is already present.
    fn add_package(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(name) {
            return idx;
        }

        let idx = self.graph.add_node(DependencyNode::new(name));
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    /// Gets a package node by name.
    pub fn get_node(&self, name: &str) -> Option<&DependencyNode> {
        self.node_indices
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Gets the packages `name` depends on (outgoing edges).
    pub fn get_dependencies(&self, name: &str) -> Vec<&DependencyNode> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Gets the packages that depend on `name` (incoming edges).
    pub fn get_dependents(&self, name: &str) -> Vec<&DependencyNode> {
        self.neighbors(name, Direction::Incoming)
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<&DependencyNode> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };

        // petgraph walks edges newest first
        let mut nodes: Vec<&DependencyNode> = self
            .graph
            .edges_directed(idx, direction)
            .filter_map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                self.graph.node_weight(other)
            })
            .collect();
        nodes.reverse();
        nodes
    }

    /// Returns the largest root distance in the graph, 0 if empty.
    pub fn max_depth(&self) -> usize {
        self.graph
            .node_weights()
            .filter_map(|node| node.depth)
            .max()
            .unwrap_or(0)
    }

    /// Checks if the graph contains cycles.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Detects and returns all cycles in the graph.
    ///
    /// Each cycle is a strongly connected component with more than one
    /// package, or a single package depending on itself.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();

        for scc in tarjan_scc(&self.graph) {
            let is_cycle = scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]);
            if is_cycle {
                cycles.push(
                    scc.iter()
                        .filter_map(|&idx| self.graph.node_weight(idx))
                        .map(|node| node.name.clone())
                        .collect(),
                );
            }
        }

        cycles
    }

    /// Returns detailed cycle information.
    pub fn get_cycle_details(&self) -> Vec<CycleInfo> {
        self.detect_cycles()
            .into_iter()
            .map(|nodes| CycleInfo { nodes })
            .collect()
    }

    /// Returns the number of packages.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Checks if a package exists in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }
}

/// Information about a detected circular dependency cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// The package names in the cycle (the last connects back to the first)
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Returns a formatted cycle path, e.g. `"a -> b -> a"`.
    pub fn cycle_path(&self) -> String {
        let Some(first) = self.nodes.first() else {
            return String::new();
        };
        format!("{} -> {}", self.nodes.join(" -> "), first)
    }

    /// Returns the number of packages in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
