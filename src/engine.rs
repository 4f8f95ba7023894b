use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use ignore::{DirEntry, WalkBuilder, WalkState};
use tracing::warn;

use crate::entry::Entry;
use crate::error::StampError;
use crate::results::{Results, ScanStats};
use crate::traits::Handler;

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters passed from the builder to the engine.
///
/// `pub(crate)` — not part of the public API. Callers configure these
/// via the builder methods (`.threads()`, `.max_depth()`).
pub(crate) struct WalkConfig {
    pub threads: usize,
    pub max_depth: Option<usize>,
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub config: WalkConfig,
    pub handler: Arc<dyn Handler>,
    pub collect_paths: bool,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Execute a parallel walk over `root`, invoking the handler on every
/// non-hidden regular file.
///
/// This is the core engine — all parallelism lives here.
/// Called by `StampBuilder::run()` after validating the root.
///
/// Traversal errors (unreadable directory, failed stat) are fatal: the first
/// one quits the walk and is returned as `Err`. Handler errors are per-file
/// and collected into [`Results::errors`] — the walk continues past them.
pub(crate) fn run(root: &Path, opts: EngineOptions) -> Result<Results, StampError> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .same_file_system(false)
        .threads(opts.config.threads);

    if let Some(depth) = opts.config.max_depth {
        builder.max_depth(Some(depth));
    }

    let walker = builder.build_parallel();

    // Shared state across threads
    let stamped = Arc::new(AtomicUsize::new(0));
    let files = Arc::new(AtomicUsize::new(0));
    let dirs = Arc::new(AtomicUsize::new(0));
    let paths = Arc::new(Mutex::new(Vec::<PathBuf>::new()));
    let errors = Arc::new(Mutex::new(Vec::<StampError>::new()));
    let fatal = Arc::new(Mutex::new(None::<StampError>));

    let start = Instant::now();

    walker.run(|| {
        let handler = Arc::clone(&opts.handler);
        let stamped = Arc::clone(&stamped);
        let files = Arc::clone(&files);
        let dirs = Arc::clone(&dirs);
        let paths = Arc::clone(&paths);
        let errors = Arc::clone(&errors);
        let fatal = Arc::clone(&fatal);
        let collect_paths = opts.collect_paths;

        Box::new(move |res: Result<DirEntry, ignore::Error>| -> WalkState {
            // A failed directory listing or stat is fatal — record the first
            // one and stop the walk.
            let entry = match res {
                Ok(e) => e,
                Err(e) => {
                    if let Ok(mut f) = fatal.lock() {
                        if f.is_none() {
                            *f = Some(map_ignore_error(e));
                        }
                    }
                    return WalkState::Quit;
                }
            };

            let ft = match entry.file_type() {
                Some(ft) => ft,
                None => return WalkState::Continue,
            };

            if ft.is_dir() {
                dirs.fetch_add(1, Ordering::Relaxed);
                return WalkState::Continue;
            }

            // Only regular files reach the handler — symlinks, pipes, etc.
            // are counted as scanned but never stamped.
            if !ft.is_file() {
                return WalkState::Continue;
            }
            files.fetch_add(1, Ordering::Relaxed);

            let name = entry.file_name().to_string_lossy().into_owned();

            let file_entry = Entry {
                path: entry.path().to_path_buf(),
                name,
                depth: entry.depth(),
            };

            // Per-file handler failures are independent: log, record,
            // keep walking.
            match handler.on_file(&file_entry) {
                Ok(()) => {
                    stamped.fetch_add(1, Ordering::Relaxed);
                    if collect_paths {
                        if let Ok(mut p) = paths.lock() {
                            p.push(file_entry.path);
                        }
                    }
                }
                Err(e) => {
                    warn!(path = %file_entry.path.display(), error = %e, "handler failed");
                    if let Ok(mut errs) = errors.lock() {
                        errs.push(e);
                    }
                }
            }

            WalkState::Continue
        })
    });

    let duration = start.elapsed();

    if let Some(err) = fatal.lock().ok().and_then(|mut f| f.take()) {
        return Err(err);
    }

    let stamped = stamped.load(Ordering::Relaxed);
    let files = files.load(Ordering::Relaxed);
    let dirs = dirs.load(Ordering::Relaxed);
    let paths = Arc::try_unwrap(paths)
        .unwrap_or_default()
        .into_inner()
        .unwrap_or_default();
    let errors = Arc::try_unwrap(errors)
        .unwrap_or_default()
        .into_inner()
        .unwrap_or_default();

    Ok(Results {
        stamped,
        paths,
        stats: ScanStats::compute(files, dirs, duration),
        errors,
    })
}

// ---------------------------------------------------------------------------
// Map ignore::Error to StampError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> StampError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => {
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    StampError::PermissionDenied(path)
                } else {
                    StampError::Io {
                        path,
                        source: io_err,
                    }
                }
            }
            _ => StampError::Walk(format!("{}", err)),
        },
        ignore::Error::Io(io_err) => StampError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => StampError::Walk(other.to_string()),
    }
}
