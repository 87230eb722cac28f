use std::path::PathBuf;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
///
/// Only the variants below ever reach the caller. Failures below the root of
/// a walk are recovered inside the walker (see `fs::walker::WalkIssue`).
#[derive(Debug, Error)]
pub enum AppError {
    /// The root path could not be resolved or stat'ed.
    #[error("cannot access '{}': {source}", path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An export or output file could not be created.
    #[error("cannot create output file '{}': {source}", path.display())]
    OutputDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors while writing output or driving the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}
