use std::path::PathBuf;
use std::time::Duration;

use crate::error::StampError;

/// The output of a completed walk.
///
/// `paths` is opt-in — disabled by default to avoid allocation overhead in the
/// common case. Enable it on the builder with `.collect_paths(true)`.
#[derive(Debug)]
pub struct Results {
    /// Number of files the handler processed successfully.
    pub stamped: usize,

    /// Paths of successfully stamped files, in the order they were processed.
    /// Only populated if `.collect_paths(true)` was set on the builder.
    /// The order is not meaningful — sibling files are walked in parallel.
    pub paths: Vec<PathBuf>,

    /// Walk performance statistics.
    pub stats: ScanStats,

    /// Per-file handler failures. The walk continued past each of these —
    /// a file listed here was reached but not stamped.
    pub errors: Vec<StampError>,
}

/// Counters and timing for a completed walk.
#[derive(Debug)]
pub struct ScanStats {
    /// Regular files the walk reached (whether or not their stamp succeeded).
    pub files: usize,

    /// Directories the walk descended into, the root included. Hidden
    /// directories are filtered out before they are counted.
    pub dirs: usize,

    /// Wall-clock time for the whole walk.
    pub duration: Duration,

    /// Throughput as entries per second, derived from the counts above.
    /// Reported as 0 when the walk finished too fast to measure.
    pub entries_per_sec: usize,
}

impl ScanStats {
    pub(crate) fn compute(files: usize, dirs: usize, duration: Duration) -> Self {
        let secs = duration.as_secs_f64();
        let eps = if secs > 0.0 {
            ((files + dirs) as f64 / secs) as usize
        } else {
            0
        };
        Self {
            files,
            dirs,
            duration,
            entries_per_sec: eps,
        }
    }
}
