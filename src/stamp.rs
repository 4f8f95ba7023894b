use std::fs::OpenOptions;
use std::io::Write;

use tracing::info;

use crate::entry::Entry;
use crate::error::StampError;
use crate::traits::Handler;

/// The literal block appended to every stamped file.
pub const MARKER: &str = "\n \n <comment/> \n ";

/// The shipped default [`Handler`]: appends a marker block to each file.
///
/// The append is a single write through an append-mode handle — no truncation,
/// no read of the existing content. Running the walk twice stamps the marker
/// twice: the appender makes no attempt to detect a prior stamp, so the
/// operation is deliberately not idempotent.
///
/// Each successful append is confirmed with an `info`-level log line naming
/// the path.
pub struct MarkerAppender {
    marker: String,
}

impl MarkerAppender {
    /// Appender for the default marker, [`MARKER`].
    pub fn new() -> Self {
        Self::with_marker(MARKER)
    }

    /// Appender for a custom marker block.
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Default for MarkerAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for MarkerAppender {
    fn on_file(&self, entry: &Entry) -> Result<(), StampError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&entry.path)
            .map_err(|source| StampError::Append {
                path: entry.path.clone(),
                source,
            })?;

        file.write_all(self.marker.as_bytes())
            .map_err(|source| StampError::Append {
                path: entry.path.clone(),
                source,
            })?;

        info!(path = %entry.path.display(), "stamped");
        Ok(())
    }
}
