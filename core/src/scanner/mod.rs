//! Journal scanner
//!
//! Reads every journal written after a cutoff date and folds the mission
//! lifecycle events into open-mission maps.
//!
//! ```text
//!   discover_logs(dir, cutoff)      sorted by mtime
//!              │
//!              ▼
//!   read_journal(file)              one JSON event per line, bad lines skipped
//!              │
//!              ▼
//!   JournalHandler                  OpenMissions / CommanderMissions
//! ```

mod discovery;
mod error;
mod handler;
mod reader;


use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use hashbrown::HashMap;

pub use discovery::discover_logs;
pub use error::ScanError;
pub use handler::{CommanderMissions, JournalHandler, MissionMap, OpenMissions};
pub use reader::read_journal;

/// Open missions of every commander seen in journals newer than `cutoff`.
pub fn scan_by_commander(
    dir: &Path,
    cutoff: NaiveDate,
) -> Result<HashMap<String, MissionMap>, ScanError> {
    let mut handler = CommanderMissions::new();
    scan_into(dir, cutoff, &mut handler)?;
    let result = handler.finish();
    tracing::debug!(commanders = result.len(), "Loaded missions for all commanders");
    Ok(result)
}

/// Open missions in journals newer than `cutoff`, regardless of commander.
pub fn scan_all(dir: &Path, cutoff: NaiveDate) -> Result<MissionMap, ScanError> {
    let mut handler = OpenMissions::new();
    scan_into(dir, cutoff, &mut handler)?;
    Ok(handler.into_missions())
}

/// Feed every journal newer than `cutoff` into `handler`, oldest first.
pub fn scan_into<H: JournalHandler>(
    dir: &Path,
    cutoff: NaiveDate,
    handler: &mut H,
) -> Result<(), ScanError> {
    for path in discover_logs(dir, cutoff)? {
        tracing::debug!(path = %path.display(), "Opening journal");

        let file_err = |source| ScanError::File {
            path: path.clone(),
            source,
        };
        let file = File::open(&path).map_err(file_err)?;
        read_journal(BufReader::new(file), &path, handler).map_err(file_err)?;
    }
    Ok(())
}

/// Keep only massacre missions.
pub fn massacre_only(missions: MissionMap) -> MissionMap {
    missions
        .into_iter()
        .filter(|(_, mission)| mission.is_massacre())
        .collect()
}
