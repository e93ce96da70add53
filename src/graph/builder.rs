//! Bounded depth-first discovery of transitive dependencies.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::source::{LookupResult, MetadataSource};

/// Traversal depth used when the caller does not pick one.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// A discovered "parent declares a direct dependency on child" relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// The declaring package.
    pub parent: String,
    /// The declared dependency.
    pub child: String,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.parent, self.child)
    }
}

/// Edges in discovery order. Duplicates are kept.
pub type EdgeSequence = Vec<Edge>;

/// Per-call traversal state. Nothing here outlives one [`build_graph`] call.
struct Traversal<'a, S: ?Sized> {
    source: &'a S,
    max_depth: usize,
    visited: HashSet<String>,
    edges: EdgeSequence,
}

impl<S: MetadataSource + ?Sized> Traversal<'_, S> {
    fn expand(&mut self, package: &str, depth: usize) -> LookupResult<()> {
        if depth > self.max_depth || self.visited.contains(package) {
            trace!(package, depth, "not expanding");
            return Ok(());
        }
        self.visited.insert(package.to_string());

        let dependencies = self.source.query(package)?;
        debug!(package, depth, count = dependencies.len(), "expanded");

        for dependency in dependencies {
            self.edges.push(Edge::new(package, dependency.as_str()));
            self.expand(&dependency, depth + 1)?;
        }

        Ok(())
    }
}

/// Discovers the dependency edges reachable from `root`.
///
/// The root sits at depth 1 and a package is expanded only while its depth
/// is at most `max_depth`, so the root is always queried when
/// `max_depth >= 1`. With `max_depth == 0` nothing is expanded and the
/// result is empty.
///
/// A package is expanded at most once per call. When a second parent
/// reaches an already-expanded package, the edge into it is still recorded
/// but nothing beneath it is revisited. This is a global visited set, not
/// a per-path one, so a diamond reached first through a shallow branch is
/// explored from there and never again.
///
/// Identifiers are compared as exact strings; no case or separator
/// normalization happens.
///
/// # Errors
///
/// Returns the first [`LookupError`](crate::source::LookupError) raised by
/// `source`, for the root or any transitive package. No partial result is
/// returned.
///
/// # Example
///
/// ```
/// use pipscope::graph::{build_graph, Edge};
/// use pipscope::source::StaticSource;
///
/// let source = StaticSource::new()
///     .with_package("flask", ["click", "jinja2"])
///     .with_package("click", Vec::<String>::new())
///     .with_package("jinja2", ["markupsafe"])
///     .with_package("markupsafe", Vec::<String>::new());
///
/// let edges = build_graph(&source, "flask", 5).unwrap();
/// assert_eq!(
///     edges,
///     vec![
///         Edge::new("flask", "click"),
///         Edge::new("flask", "jinja2"),
///         Edge::new("jinja2", "markupsafe"),
///     ]
/// );
/// ```
pub fn build_graph<S>(source: &S, root: &str, max_depth: usize) -> LookupResult<EdgeSequence>
where
    S: MetadataSource + ?Sized,
{
    let mut traversal = Traversal {
        source,
        max_depth,
        visited: HashSet::new(),
        edges: Vec::new(),
    };
    traversal.expand(root, 1)?;

    debug!(
        root,
        max_depth,
        packages = traversal.visited.len(),
        edges = traversal.edges.len(),
        "traversal finished"
    );
    Ok(traversal.edges)
}
