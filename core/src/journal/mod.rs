//! Journal event model
//!
//! The game client writes one JSON object per line to append-only `.log`
//! files. Only the commander and mission lifecycle events are modelled.

mod event;
mod mission;

pub use event::{JournalEvent, MissionAccepted, parse_line};
pub use mission::MissionRecord;
