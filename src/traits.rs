use crate::entry::Entry;
use crate::error::StampError;

/// A per-file action invoked once for every file the walk discovers.
///
/// Implement this to do anything with the discovered files — append a marker
/// (the shipped [`MarkerAppender`](crate::MarkerAppender)), collect paths,
/// rewrite contents, or push them somewhere else entirely.
///
/// # Thread Safety
///
/// `Send + Sync` are required — the handler is shared across walk threads and
/// called concurrently on different files. It is never called twice for the
/// same file, so no per-path locking is needed.
///
/// # Error Handling
///
/// A handler failure is fatal for that file only: the engine records the error
/// into [`Results::errors`](crate::Results) and the walk continues past it.
/// Each invocation is independent — failing on one file must not assume it
/// stops siblings from being processed.
///
/// # Closures
///
/// Any `Fn(&Entry) -> Result<(), StampError> + Send + Sync` closure is a
/// handler, so the builder's `.on_file()` accepts plain closures:
///
/// ```rust,no_run
/// let results = treestamp::stamp("blogs")
///     .on_file(|entry| {
///         println!("found {}", entry.path.display());
///         Ok(())
///     })
///     .run()
///     .unwrap();
/// ```
pub trait Handler: Send + Sync {
    /// Process one discovered file.
    ///
    /// `entry.path` is the file's full path. Return `Err` to record a per-file
    /// failure without stopping the walk.
    fn on_file(&self, entry: &Entry) -> Result<(), StampError>;
}

impl<F> Handler for F
where
    F: Fn(&Entry) -> Result<(), StampError> + Send + Sync,
{
    fn on_file(&self, entry: &Entry) -> Result<(), StampError> {
        self(entry)
    }
}
