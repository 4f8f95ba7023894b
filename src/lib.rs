//! # treestamp
//!
//! Parallel directory-tree stamper — walks a tree and appends a marker to
//! every file.
//!
//! treestamp owns the walk engine, the per-file [`Handler`] contract, the
//! error type, and the builder API. The shipped default handler,
//! [`MarkerAppender`], appends a fixed marker block to each discovered file.
//! What else to do with the discovered files belongs to the caller.
//!
//! # Traversal contract
//!
//! - Every non-hidden regular file reachable from the root is visited exactly
//!   once. Hidden entries (names starting with `.`) and everything beneath a
//!   hidden directory are never visited.
//! - Sibling entries and subtrees are walked in parallel — no ordering
//!   guarantee across files, and none should be relied on.
//! - A nonexistent root fails before any file is touched. Traversal errors
//!   (unreadable directory, failed stat) are fatal and stop the walk.
//!   Per-file handler failures are independent: they land in
//!   [`Results::errors`] and the walk continues.
//! - Stamping is not idempotent — a second run appends a second marker.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let results = treestamp::stamp("blogs")
//!     .collect_paths(true)
//!     .run()
//!     .unwrap();
//!
//! println!("stamped {} files in {:.3}s",
//!     results.stamped,
//!     results.stats.duration.as_secs_f64()
//! );
//! ```
//!
//! # Custom Handlers
//!
//! Implement [`Handler`] (or pass a closure to `.on_file()`) to run your own
//! per-file action instead of the marker appender:
//!
//! ```rust,no_run
//! use treestamp::{Entry, Handler, StampError};
//!
//! struct Lister;
//!
//! impl Handler for Lister {
//!     fn on_file(&self, entry: &Entry) -> Result<(), StampError> {
//!         println!("{} (depth {})", entry.path.display(), entry.depth);
//!         Ok(())
//!     }
//! }
//!
//! let results = treestamp::stamp("blogs")
//!     .with_handler(Lister)
//!     .run()
//!     .unwrap();
//! ```

#![forbid(unsafe_code)]

mod builder;
mod engine;
mod entry;
mod error;
mod results;
mod stamp;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::StampBuilder;
pub use entry::Entry;
pub use error::StampError;
pub use results::{Results, ScanStats};
pub use stamp::{MarkerAppender, MARKER};
pub use traits::Handler;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`StampBuilder`] for a walk rooted at `root`.
///
/// The root must name an existing directory when [`run()`](StampBuilder::run)
/// is called; it is an explicit parameter rather than anything derived from
/// the program's own location.
///
/// # Example
///
/// ```rust,no_run
/// let results = treestamp::stamp("blogs")
///     .threads(8)
///     .run()
///     .unwrap();
///
/// assert!(results.errors.is_empty());
/// ```
pub fn stamp(root: impl Into<std::path::PathBuf>) -> StampBuilder {
    StampBuilder::new(root.into())
}
