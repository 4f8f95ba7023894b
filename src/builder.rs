use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::{run, EngineOptions, WalkConfig};
use crate::error::StampError;
use crate::results::Results;
use crate::stamp::MarkerAppender;
use crate::traits::Handler;

// ---------------------------------------------------------------------------
// StampBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a stamping walk.
///
/// Created via [`treestamp::stamp()`](crate::stamp()). Configure with chained
/// builder methods, then call [`run()`](StampBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let results = treestamp::stamp("blogs")
///     .threads(8)
///     .collect_paths(true)
///     .run()?;
/// ```
pub struct StampBuilder {
    root: PathBuf,
    handler: Option<Box<dyn Handler>>,
    threads: usize,
    max_depth: Option<usize>,
    collect_paths: bool,
}

impl StampBuilder {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root,
            handler: None,
            threads: num_cpus(),
            max_depth: None,
            collect_paths: false,
        }
    }

    // ── Handler ───────────────────────────────────────────────────────────

    /// Set a custom per-file handler.
    ///
    /// Any type implementing [`Handler`] is accepted. When no handler is set,
    /// the walk uses [`MarkerAppender`] with the default marker.
    pub fn with_handler(mut self, h: impl Handler + 'static) -> Self {
        self.handler = Some(Box::new(h));
        self
    }

    /// Shorthand for a closure handler.
    ///
    /// Equivalent to `.with_handler(f)` — any
    /// `Fn(&Entry) -> Result<(), StampError> + Send + Sync` closure works.
    pub fn on_file<F>(self, f: F) -> Self
    where
        F: Fn(&crate::entry::Entry) -> Result<(), StampError> + Send + Sync + 'static,
    {
        self.with_handler(f)
    }

    /// Append a custom marker block instead of the default.
    ///
    /// Equivalent to `.with_handler(MarkerAppender::with_marker(text))`.
    pub fn marker(self, text: impl Into<String>) -> Self {
        self.with_handler(MarkerAppender::with_marker(text))
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Number of threads to use for parallel traversal.
    ///
    /// Defaults to the number of logical CPU cores. Values exceeding the
    /// available core count are accepted but won't improve performance.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    /// Maximum traversal depth. `0` means the root only, `1` means one
    /// level of children, and so on. Unlimited by default.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }

    /// Collect stamped paths into [`Results::paths`].
    ///
    /// Disabled by default to avoid allocation overhead when paths aren't needed.
    pub fn collect_paths(mut self, yes: bool) -> Self {
        self.collect_paths = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the walk and return results.
    ///
    /// Blocks until the walk completes. Sibling files and subtrees are
    /// processed in no particular order — callers must not depend on the
    /// sequence in which files are stamped.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the root does not exist or is not a directory
    /// (checked before any file is touched), and for fatal traversal errors
    /// (unreadable directory, failed stat). Per-file handler failures are
    /// collected into [`Results::errors`] instead — the walk continues past
    /// them.
    pub fn run(self) -> Result<Results, StampError> {
        if !self.root.exists() {
            return Err(StampError::NotFound(self.root));
        }
        if !self.root.is_dir() {
            return Err(StampError::NotADirectory(self.root));
        }

        // Default handler: append the fixed marker
        let handler: Arc<dyn Handler> = match self.handler {
            Some(h) => Arc::from(h),
            None => Arc::new(MarkerAppender::new()),
        };

        let opts = EngineOptions {
            config: WalkConfig {
                threads: self.threads,
                max_depth: self.max_depth,
            },
            handler,
            collect_paths: self.collect_paths,
        };

        run(&self.root, opts)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Get the logical CPU count, with a safe fallback.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
