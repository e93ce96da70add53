//! Hand-off to the external PlantUML renderer.
//!
//! The renderer is a Java jar driven as `java -jar <jar> -tpng <script>`.
//! It writes the image next to the script, with the same stem and a
//! `.png` extension. Failures on this side are reported as-is; nothing
//! here inspects what the renderer printed.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, info};

/// Errors that can occur while producing the diagram image.
#[derive(Debug, thiserror::Error)]
pub enum VisualizeError {
    /// Failed to write the script file.
    #[error("Failed to write script {path}: {source}")]
    Io {
        /// The script path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The renderer could not be started (missing executable, permissions).
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// The program that was launched.
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer ran but reported failure.
    #[error("PlantUML renderer exited with {status}: {stderr}")]
    ToolFailed {
        /// Exit status of the renderer.
        status: ExitStatus,
        /// What the renderer wrote to stderr, trimmed.
        stderr: String,
    },
}

/// Result type alias for visualizer operations.
pub type VisualizeResult<T> = Result<T, VisualizeError>;

/// Runs the PlantUML jar on a rendered script.
#[derive(Debug, Clone)]
pub struct Visualizer {
    java: OsString,
    jar: PathBuf,
}

impl Visualizer {
    /// Uses `java` from `PATH` with the given PlantUML jar.
    pub fn new(jar: impl Into<PathBuf>) -> Self {
        Self {
            java: OsString::from("java"),
            jar: jar.into(),
        }
    }

    /// Overrides the Java launcher.
    pub fn with_java(mut self, java: impl Into<OsString>) -> Self {
        self.java = java.into();
        self
    }

    /// Writes `script` to `script_path` and renders it to PNG.
    ///
    /// Returns the path the renderer writes the image to. The script file
    /// is left in place. The renderer's own output is captured and logged
    /// at debug level, never passed through to this process's stdout.
    pub fn render(&self, script: &str, script_path: &Path) -> VisualizeResult<PathBuf> {
        fs::write(script_path, script).map_err(|source| VisualizeError::Io {
            path: script_path.to_path_buf(),
            source,
        })?;
        debug!(path = %script_path.display(), "wrote PlantUML script");

        let output = Command::new(&self.java)
            .arg("-jar")
            .arg(&self.jar)
            .arg("-tpng")
            .arg(script_path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| VisualizeError::Spawn {
                program: self.java.to_string_lossy().into_owned(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(stdout = %stdout.trim(), stderr = %stderr.trim(), "renderer finished");

        if !output.status.success() {
            return Err(VisualizeError::ToolFailed {
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        let image = image_path(script_path);
        info!(path = %image.display(), "rendered diagram");
        Ok(image)
    }
}

/// Where PlantUML puts the PNG for a given script.
pub fn image_path(script_path: &Path) -> PathBuf {
    script_path.with_extension("png")
}
