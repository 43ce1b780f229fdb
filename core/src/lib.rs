pub mod aggregate;
pub mod journal;
pub mod report;
pub mod scanner;
pub mod settings;
pub mod version;

// Re-exports for convenience
pub use aggregate::{AggregateStatistics, FactionState, aggregate};
pub use journal::{JournalEvent, MissionRecord, parse_line};
pub use report::SummaryTable;
pub use scanner::{MissionMap, ScanError, massacre_only, scan_all, scan_by_commander};
pub use settings::{SettingsError, SettingsStore};
