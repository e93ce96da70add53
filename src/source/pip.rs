//! Metadata source backed by `pip show`.
//!
//! `pip show <name>` prints a colon-delimited record for an installed
//! distribution. The only field read here is `Requires:`, a comma-separated
//! list of direct dependency names.

use std::ffi::OsString;
use std::process::Command;

use tracing::debug;

use super::{LookupError, LookupResult, MetadataSource};

const REQUIRES_FIELD: &str = "Requires:";

/// Queries the installed-package registry through the `pip` executable.
#[derive(Debug, Clone)]
pub struct PipSource {
    program: OsString,
}

impl Default for PipSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PipSource {
    /// Uses `pip` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("pip")
    }

    /// Uses the given executable instead of `pip` (e.g. `pip3` or a venv path).
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MetadataSource for PipSource {
    fn query(&self, name: &str) -> LookupResult<Vec<String>> {
        debug!(package = name, program = ?self.program, "querying pip");

        let output = Command::new(&self.program)
            .arg("show")
            .arg(name)
            .output()
            .map_err(|source| LookupError::Command {
                package: name.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(LookupError::NotFound {
                package: name.to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| LookupError::InvalidOutput {
            package: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(parse_requires(&stdout))
    }
}

/// Extracts the `Requires:` field from `pip show` output.
///
/// The value is split on commas and each entry trimmed, so `a, b` and
/// `a,b` read the same. Entries keep their declared order. A missing
/// field or an empty value yields an empty list. If the field appears
/// more than once, the last occurrence wins.
///
/// # Example
///
/// ```
/// use pipscope::source::parse_requires;
///
/// let record = "Name: requests\nRequires: certifi, idna\nRequired-by: \n";
/// assert_eq!(parse_requires(record), vec!["certifi", "idna"]);
/// ```
pub fn parse_requires(record: &str) -> Vec<String> {
    let mut requires = Vec::new();

    for line in record.lines() {
        if let Some(value) = line.strip_prefix(REQUIRES_FIELD) {
            requires = value
                .split(',')
                .map(str::trim)
                .filter(|dep| !dep.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    requires
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUESTS_RECORD: &str = "\
Name: requests
Version: 2.32.3
Summary: Python HTTP for Humans.
Home-page: https://requests.readthedocs.io
Location: /usr/lib/python3/site-packages
Requires: certifi, charset-normalizer, idna, urllib3
Required-by: pip-audit
";

    #[test]
    fn test_parse_requires() {
        assert_eq!(
            parse_requires(REQUESTS_RECORD),
            vec!["certifi", "charset-normalizer", "idna", "urllib3"]
        );
    }

    #[test]
    fn test_parse_requires_tolerates_missing_space() {
        let record = "Requires: a,b , c\n";
        assert_eq!(parse_requires(record), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_requires_empty_value() {
        let record = "Name: idna\nRequires: \nRequired-by: requests\n";
        assert!(parse_requires(record).is_empty());
    }

    #[test]
    fn test_parse_requires_field_without_space() {
        assert!(parse_requires("Name: idna\nRequires:\n").is_empty());
    }

    #[test]
    fn test_parse_requires_missing_field() {
        assert!(parse_requires("Name: idna\nVersion: 3.7\n").is_empty());
    }

    #[test]
    fn test_parse_requires_ignores_required_by() {
        let record = "Requires: six\nRequired-by: a, b\n";
        assert_eq!(parse_requires(record), vec!["six"]);
    }

    #[test]
    fn test_parse_requires_keeps_names_verbatim() {
        let record = "Requires: Jinja2, typing_extensions\n";
        assert_eq!(parse_requires(record), vec!["Jinja2", "typing_extensions"]);
    }

    #[test]
    fn test_missing_program() {
        let source = PipSource::with_program("pipscope-no-such-pip");
        let err = source.query("requests").unwrap_err();
        assert!(matches!(err, LookupError::Command { .. }));
        assert_eq!(err.package(), "requests");
    }

    #[cfg(unix)]
    mod fake_pip {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;

        fn write_script(dir: &tempfile::TempDir, body: &str) -> PathBuf {
            let path = dir.path().join("pip");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_query_reads_requires() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(
                &dir,
                "if [ \"$2\" = requests ]; then\n\
                 printf 'Name: requests\\nRequires: certifi, idna\\n'\n\
                 else\n\
                 echo 'WARNING: Package(s) not found' >&2; exit 1\n\
                 fi",
            );
            let source = PipSource::with_program(script);

            assert_eq!(source.query("requests").unwrap(), vec!["certifi", "idna"]);
            assert!(matches!(
                source.query("flask"),
                Err(LookupError::NotFound { ref package }) if package == "flask"
            ));
        }
    }
}
