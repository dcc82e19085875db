//! Error types for the benchmark engine.

use std::path::{Path, PathBuf};

/// Engine errors.
///
/// An absent baseline is deliberately not represented here: it is an expected
/// first-run state and is surfaced as data (`Option<Baseline>`,
/// [`crate::CompareOutcome::NoBaseline`]).
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// No result files were found, or there was nothing to aggregate.
    #[error("{message}")]
    MissingInput { message: String },

    /// An artifact exists but could not be decoded.
    #[error("malformed input {}: {message}", path.display())]
    MalformedInput { path: PathBuf, message: String },

    /// Filesystem failure while reading a directory or writing an artifact.
    #[error("i/o error at {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// Configuration file could not be read or parsed.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl BenchError {
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::MissingInput {
            message: message.into(),
        }
    }

    pub fn malformed(path: &Path, message: impl ToString) -> Self {
        Self::MalformedInput {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn io(path: &Path, err: impl ToString) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Exit code for CLI.
    ///
    /// Input problems degrade to a reported, successful exit; only failures
    /// the engine cannot continue past are non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingInput { .. } => 0,
            Self::MalformedInput { .. } => 0,
            Self::Io { .. } => 2,
            Self::Config { .. } => 2,
        }
    }
}

/// Result type for engine operations.
pub type BenchResult<T> = Result<T, BenchError>;
