use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a scan.
///
/// Malformed lines are not errors: they are logged and skipped by the reader.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read journal directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read journal file {path:?}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}
