//! Journal file discovery
//!
//! Finds the `.log` files in the journal directory that were written after a
//! cutoff date, ordered so that commander switches replay in the order the
//! game wrote them.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, Utc};

use super::ScanError;

const LOG_EXTENSION: &str = "log";

/// List journal logs modified strictly after `cutoff` (compared as UTC dates).
///
/// The result is sorted by modification time ascending, ties broken by path,
/// so repeated scans of an unchanged directory see the same order.
pub fn discover_logs(dir: &Path, cutoff: NaiveDate) -> Result<Vec<PathBuf>, ScanError> {
    let dir_err = |source| ScanError::Directory {
        path: dir.to_path_buf(),
        source,
    };

    let mut logs: Vec<(SystemTime, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir).map_err(dir_err)? {
        let path = entry.map_err(dir_err)?.path();

        if !path.extension().is_some_and(|ext| ext == LOG_EXTENSION) {
            continue;
        }

        let file_err = |source| ScanError::File {
            path: path.clone(),
            source,
        };
        // Follows symlinks; a dangling one is skipped like any non-file
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Skipping dangling journal link");
                continue;
            }
            Err(e) => return Err(file_err(e)),
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified().map_err(file_err)?;
        if modified_date(modified) > cutoff {
            logs.push((modified, path));
        }
    }

    logs.sort();
    tracing::debug!(count = logs.len(), %cutoff, "Found journal logs after cutoff");

    Ok(logs.into_iter().map(|(_, path)| path).collect())
}

fn modified_date(modified: SystemTime) -> NaiveDate {
    DateTime::<Utc>::from(modified).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_modified_date_is_utc() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap();
        let modified = SystemTime::from(instant);
        assert_eq!(
            modified_date(modified),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }
}
