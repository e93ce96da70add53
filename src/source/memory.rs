//! In-memory metadata source.

use std::collections::HashMap;

use super::{LookupError, LookupResult, MetadataSource};

/// A metadata source backed by a fixed map of package declarations.
///
/// Lookups are exact string matches; `"Foo"` and `"foo"` are different
/// packages here, just as they are for the graph builder.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    packages: HashMap<String, Vec<String>>,
}

impl StaticSource {
    /// Creates an empty source. Every query fails until packages are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` with the given direct dependencies, replacing any
    /// previous declaration.
    pub fn with_package<I, D>(mut self, name: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        self.insert(name, dependencies);
        self
    }

    /// In-place form of [`StaticSource::with_package`].
    pub fn insert<I, D>(&mut self, name: impl Into<String>, dependencies: I)
    where
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        self.packages.insert(
            name.into(),
            dependencies.into_iter().map(Into::into).collect(),
        );
    }

    /// Returns the number of declared packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns true if no packages are declared.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl MetadataSource for StaticSource {
    fn query(&self, name: &str) -> LookupResult<Vec<String>> {
        self.packages
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                package: name.to_string(),
            })
    }
}
