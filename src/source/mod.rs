//! Package metadata sources.
//!
//! A [`MetadataSource`] answers one question: which packages does a given
//! package declare as direct dependencies? The graph builder only ever
//! talks to this trait, so the installed-package registry and in-memory
//! fixtures are interchangeable.
//!
//! # Supported Sources
//!
//! - **pip** (`pip show`) - [`PipSource`]
//! - **In-memory** - [`StaticSource`], for tests and pre-computed graphs
//!
//! # Example
//!
//! ```
//! use pipscope::source::{MetadataSource, StaticSource};
//!
//! let source = StaticSource::new()
//!     .with_package("requests", ["certifi", "idna"])
//!     .with_package("certifi", Vec::<String>::new());
//!
//! assert_eq!(source.query("requests").unwrap(), vec!["certifi", "idna"]);
//! assert!(source.query("certifi").unwrap().is_empty());
//! assert!(source.query("flask").is_err());
//! ```

pub mod memory;
pub mod pip;

pub use memory::StaticSource;
pub use pip::{parse_requires, PipSource};

/// Errors raised while looking up a package's metadata.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The source has no record of the package.
    #[error("Package '{package}' not found")]
    NotFound {
        /// The package that was queried.
        package: String,
    },

    /// The metadata tool could not be started.
    #[error("Failed to query package '{package}': {source}")]
    Command {
        /// The package that was queried.
        package: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The metadata tool answered with something unreadable.
    #[error("Invalid metadata for package '{package}': {reason}")]
    InvalidOutput {
        /// The package that was queried.
        package: String,
        /// What was wrong with the output.
        reason: String,
    },
}

impl LookupError {
    /// Returns the name of the package whose lookup failed.
    pub fn package(&self) -> &str {
        match self {
            LookupError::NotFound { package }
            | LookupError::Command { package, .. }
            | LookupError::InvalidOutput { package, .. } => package,
        }
    }
}

/// Result type alias for metadata lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// A provider of direct-dependency information.
///
/// Implementations must:
///
/// - fail with [`LookupError`] when the package is unknown,
/// - return an empty list (not an error) for a package with no dependencies,
/// - return dependencies in declared order.
pub trait MetadataSource {
    /// Returns the direct dependencies of `name`, in declared order.
    fn query(&self, name: &str) -> LookupResult<Vec<String>>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn query(&self, name: &str) -> LookupResult<Vec<String>> {
        (**self).query(name)
    }
}
