//! Journal event handlers
//!
//! A handler folds the event stream of one scan into a result. Two are
//! provided:
//! - [`OpenMissions`]: one flat `mission_id -> record` map across every commander
//! - [`CommanderMissions`]: the same map partitioned by the active commander
//!
//! Redirect policy (both handlers): a `MissionRedirected` event marks the
//! mission completed and keeps it, so completed kills and rewards stay
//! countable. `MissionCompleted`, `MissionAbandoned` and `MissionFailed`
//! remove the mission because it is no longer open.

use hashbrown::HashMap;

use crate::journal::{JournalEvent, MissionRecord};

/// Open missions keyed by mission id.
pub type MissionMap = HashMap<u64, MissionRecord>;

/// Consumer of parsed journal events.
pub trait JournalHandler {
    fn handle_event(&mut self, event: JournalEvent);

    /// Called after the last line of each file.
    fn end_of_file(&mut self) {}
}

/// Flat accumulator of open missions, ignoring which commander owns them.
#[derive(Debug, Clone, Default)]
pub struct OpenMissions {
    missions: MissionMap,
}

impl OpenMissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missions(&self) -> &MissionMap {
        &self.missions
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    pub fn into_missions(self) -> MissionMap {
        self.missions
    }

}

impl JournalHandler for OpenMissions {
    fn handle_event(&mut self, event: JournalEvent) {
        match event {
            JournalEvent::MissionAccepted(accepted) => {
                let record = MissionRecord::from(accepted);
                self.missions.insert(record.mission_id, record);
            }
            JournalEvent::MissionRedirected { mission_id } => {
                match self.missions.get_mut(&mission_id) {
                    Some(mission) => mission.is_completed = true,
                    None => tracing::trace!(mission_id, "Redirect for untracked mission"),
                }
            }
            other => {
                if let Some(mission_id) = other.closed_mission_id() {
                    self.missions.remove(&mission_id);
                }
            }
        }
    }
}

/// Open missions partitioned by commander.
///
/// State is the commander named by the most recent `Commander` event. Mission
/// events seen before any commander is known are dropped.
///
/// A `Commander` event repeating the active name keeps the accumulator. A
/// different name flushes it and starts an empty one, so a commander seen
/// again later is reported with the missions of their latest session only.
#[derive(Debug, Clone, Default)]
pub struct CommanderMissions {
    current: Option<String>,
    open: OpenMissions,
    by_commander: HashMap<String, MissionMap>,
}

impl CommanderMissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commander the next mission events will be credited to.
    pub fn current_commander(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Flush the active commander and return every commander's missions.
    pub fn finish(mut self) -> HashMap<String, MissionMap> {
        self.flush();
        self.by_commander
    }

    fn switch_commander(&mut self, name: String) {
        if self.current.as_deref() == Some(name.as_str()) {
            return;
        }

        self.flush();

        tracing::debug!(commander = %name, "Commander switched");
        self.open = OpenMissions::new();
        self.current = Some(name);
    }

    /// Store the active accumulator, replacing any earlier map for the same
    /// commander. An empty accumulator drops the entry.
    fn flush(&mut self) {
        let Some(name) = self.current.as_ref() else {
            return;
        };
        if self.open.is_empty() {
            self.by_commander.remove(name);
        } else {
            self.by_commander
                .insert(name.clone(), self.open.missions().clone());
        }
    }
}

impl JournalHandler for CommanderMissions {
    fn handle_event(&mut self, event: JournalEvent) {
        match event {
            JournalEvent::Commander { name } => self.switch_commander(name),
            JournalEvent::Other => {}
            event if self.current.is_some() => self.open.handle_event(event),
            _ => {}
        }
    }

    fn end_of_file(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::MissionAccepted;

    fn accepted(mission_id: u64, faction: &str) -> JournalEvent {
        JournalEvent::MissionAccepted(MissionAccepted {
            mission_id,
            name: "Mission_Massacre".to_string(),
            faction: faction.to_string(),
            kill_count: 10,
            reward: 1_000_000,
            ..Default::default()
        })
    }

    fn commander(name: &str) -> JournalEvent {
        JournalEvent::Commander {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_redirect_marks_completed() {
        let mut open = OpenMissions::new();
        open.handle_event(accepted(42, "A"));
        open.handle_event(JournalEvent::MissionRedirected { mission_id: 42 });

        let mission = &open.missions()[&42];
        assert!(mission.is_completed);
    }

    #[test]
    fn test_redirect_for_unknown_mission_is_ignored() {
        let mut open = OpenMissions::new();
        open.handle_event(JournalEvent::MissionRedirected { mission_id: 1 });
        assert!(open.is_empty());
    }

    #[test]
    fn test_accept_overwrites_same_id() {
        let mut open = OpenMissions::new();
        open.handle_event(accepted(1, "A"));
        open.handle_event(JournalEvent::MissionRedirected { mission_id: 1 });
        open.handle_event(accepted(1, "B"));

        let mission = &open.missions()[&1];
        assert_eq!(mission.source_faction, "B");
        assert!(!mission.is_completed);
    }

    #[test]
    fn test_closing_events_remove() {
        let mut open = OpenMissions::new();
        for id in 1..=4 {
            open.handle_event(accepted(id, "A"));
        }
        open.handle_event(JournalEvent::MissionCompleted { mission_id: 1 });
        open.handle_event(JournalEvent::MissionAbandoned { mission_id: 2 });
        open.handle_event(JournalEvent::MissionFailed { mission_id: 3 });

        let ids: Vec<u64> = open.missions().keys().copied().collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn test_missions_before_commander_are_dropped() {
        let mut log = CommanderMissions::new();
        log.handle_event(accepted(1, "A"));
        log.handle_event(commander("X"));
        log.handle_event(accepted(2, "A"));

        let result = log.finish();
        assert_eq!(result.len(), 1);
        assert!(result["X"].contains_key(&2));
        assert!(!result["X"].contains_key(&1));
    }

    #[test]
    fn test_same_commander_keeps_accumulator() {
        let mut log = CommanderMissions::new();
        log.handle_event(commander("X"));
        log.handle_event(accepted(1, "A"));
        log.end_of_file();
        log.handle_event(commander("X"));
        log.handle_event(accepted(2, "A"));

        let result = log.finish();
        assert_eq!(result["X"].len(), 2);
    }

    #[test]
    fn test_switch_back_starts_fresh_accumulator() {
        let mut log = CommanderMissions::new();
        log.handle_event(commander("X"));
        log.handle_event(accepted(1, "A"));
        log.handle_event(commander("Y"));
        log.handle_event(accepted(2, "B"));
        log.handle_event(commander("X"));
        log.handle_event(accepted(3, "A"));
        // Mission 1 belongs to the earlier session and is no longer tracked
        log.handle_event(JournalEvent::MissionRedirected { mission_id: 1 });
        assert_eq!(log.current_commander(), Some("X"));

        let result = log.finish();
        let x_ids: Vec<u64> = result["X"].keys().copied().collect();
        assert_eq!(x_ids, vec![3]);
        assert_eq!(result["Y"].len(), 1);
        assert!(result["Y"].contains_key(&2));
    }

    #[test]
    fn test_switch_back_without_missions_drops_earlier_session() {
        let mut log = CommanderMissions::new();
        log.handle_event(commander("X"));
        log.handle_event(accepted(1, "A"));
        log.handle_event(commander("Y"));
        log.handle_event(accepted(2, "B"));
        log.handle_event(commander("X"));

        let result = log.finish();
        assert!(!result.contains_key("X"));
        assert!(result.contains_key("Y"));
    }

    #[test]
    fn test_commander_without_missions_is_not_reported() {
        let mut log = CommanderMissions::new();
        log.handle_event(commander("X"));
        log.handle_event(commander("Y"));
        log.handle_event(accepted(1, "A"));

        let result = log.finish();
        assert!(!result.contains_key("X"));
        assert!(result.contains_key("Y"));
    }
}
