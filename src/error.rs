use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampError {
    // Root validation
    #[error("root path not found")]
    NotFound(PathBuf),

    #[error("root path is not a directory")]
    NotADirectory(PathBuf),

    // Traversal
    #[error("permission denied")]
    PermissionDenied(PathBuf),

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk error")]
    Walk(String),

    // Per-file handler failures
    #[error("append failed")]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Third-party extensibility
    #[error("handler error")]
    Handler(String),
}

impl StampError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "failed: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::PermissionDenied(p)
            | Self::Io { path: p, .. }
            | Self::Append { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the walk can continue after this error.
    ///
    /// Per-file handler failures (append denied, file vanished) are recoverable —
    /// they land in [`Results::errors`](crate::Results) and the walk keeps going,
    /// since each file is processed independently.
    ///
    /// Traversal errors (unreadable directory, failed stat) are fatal: the walk
    /// stops and the error is returned from `run()`.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Append { .. } | Self::Handler(_))
    }
}
