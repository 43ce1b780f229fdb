use serde::Deserialize;

/// A journal line reduced to the events the mission tracker cares about.
///
/// Journal lines are JSON objects tagged by their `event` field. Every event
/// not listed here deserializes to [`JournalEvent::Other`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event")]
pub enum JournalEvent {
    /// Written when a commander loads into the game.
    Commander {
        #[serde(rename = "Name")]
        name: String,
    },

    MissionAccepted(MissionAccepted),

    /// Kills are done and the mission now points back at the issuing station.
    MissionRedirected {
        #[serde(rename = "MissionID")]
        mission_id: u64,
    },

    MissionCompleted {
        #[serde(rename = "MissionID")]
        mission_id: u64,
    },

    MissionAbandoned {
        #[serde(rename = "MissionID")]
        mission_id: u64,
    },

    MissionFailed {
        #[serde(rename = "MissionID")]
        mission_id: u64,
    },

    #[serde(other)]
    Other,
}

impl JournalEvent {
    /// Mission id for events that close a mission without completing it in place.
    pub fn closed_mission_id(&self) -> Option<u64> {
        match self {
            JournalEvent::MissionCompleted { mission_id }
            | JournalEvent::MissionAbandoned { mission_id }
            | JournalEvent::MissionFailed { mission_id } => Some(*mission_id),
            _ => None,
        }
    }
}

/// Raw payload of a `MissionAccepted` event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MissionAccepted {
    #[serde(rename = "MissionID")]
    pub mission_id: u64,
    #[serde(default)]
    pub name: String,
    /// Faction that issued the mission.
    #[serde(default)]
    pub faction: String,
    #[serde(default)]
    pub target_faction: String,
    /// Internal tag such as `$MissionUtil_FactionTag_Pirate;`.
    #[serde(default)]
    pub target_type: String,
    #[serde(default, rename = "TargetType_Localised")]
    pub target_type_localised: Option<String>,
    #[serde(default)]
    pub destination_system: String,
    #[serde(default)]
    /// Unsigned so a negative count fails to parse and the line is skipped.
    pub kill_count: u32,
    #[serde(default)]
    pub reward: i64,
    #[serde(default)]
    pub wing: bool,
}

/// Parse one journal line.
///
/// Blank lines carry no event and parse as [`JournalEvent::Other`].
pub fn parse_line(line: &str) -> Result<JournalEvent, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(JournalEvent::Other);
    }
    serde_json::from_str(line)
}
