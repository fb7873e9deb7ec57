//! Bootstrap error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while bootstrapping the project.
///
/// None of these are recovered from: every variant aborts the run.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("download failed for {url}: {message}")]
    Http { url: String, message: String },

    #[error("sha256 integrity check failed for '{}'\n  expected: {expected}\n  got:      {actual}", path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("cannot read zip archive {}: {source}", path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive {} contains unsafe path: {entry}", archive.display())]
    UnsafeEntry { archive: PathBuf, entry: String },

    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("build configuration tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("build configuration failed: {tool} (exit code: {code:?})")]
    ToolFailed { tool: String, code: Option<i32> },

    #[error("invalid manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("unknown dependency: {0}")]
    UnknownDependency(String),
}

impl BootstrapError {
    /// Wrap an I/O error with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = BootstrapError> = std::result::Result<T, E>;
