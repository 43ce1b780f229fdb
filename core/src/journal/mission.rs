use serde::{Deserialize, Serialize};

use super::event::MissionAccepted;

/// Mission template names of massacre (bounty kill) missions start with this.
const MASSACRE_PREFIX: &str = "Mission_Massacre";

/// One accepted kill contract as tracked across a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub mission_id: u64,
    /// Mission template name, e.g. `Mission_MassacreWing`.
    pub name: String,
    /// Faction that issued the mission. Kills are turned in here.
    pub source_faction: String,
    /// Faction whose ships must be destroyed.
    pub target_faction: String,
    pub target_type: String,
    pub target_system: String,
    /// Kills required.
    pub count: u32,
    pub reward: i64,
    /// Reward is shared with wing members.
    pub is_wing: bool,
    pub is_completed: bool,
}

impl MissionRecord {
    pub fn is_massacre(&self) -> bool {
        self.name.starts_with(MASSACRE_PREFIX)
    }
}

impl From<MissionAccepted> for MissionRecord {
    fn from(accepted: MissionAccepted) -> Self {
        let target_type = match accepted.target_type_localised {
            Some(label) if !label.is_empty() => label,
            _ => accepted.target_type,
        };

        Self {
            mission_id: accepted.mission_id,
            name: accepted.name,
            source_faction: accepted.faction,
            target_faction: accepted.target_faction,
            target_type,
            target_system: accepted.destination_system,
            count: accepted.kill_count,
            reward: accepted.reward,
            is_wing: accepted.wing,
            is_completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(name: &str, localised: Option<&str>) -> MissionAccepted {
        MissionAccepted {
            mission_id: 5,
            name: name.to_string(),
            faction: "Sirius Corp".to_string(),
            target_faction: "Rebels of Dromi".to_string(),
            target_type: "$MissionUtil_FactionTag_Pirate;".to_string(),
            target_type_localised: localised.map(str::to_string),
            destination_system: "Dromi".to_string(),
            kill_count: 12,
            reward: 4_000_000,
            wing: true,
        }
    }

    #[test]
    fn test_record_from_accepted_prefers_localised_type() {
        let record = MissionRecord::from(accepted("Mission_MassacreWing", Some("Pirates")));
        assert_eq!(record.mission_id, 5);
        assert_eq!(record.source_faction, "Sirius Corp");
        assert_eq!(record.target_type, "Pirates");
        assert_eq!(record.target_system, "Dromi");
        assert_eq!(record.count, 12);
        assert!(record.is_wing);
        assert!(!record.is_completed);
    }

    #[test]
    fn test_record_from_accepted_falls_back_to_raw_type() {
        let record = MissionRecord::from(accepted("Mission_Massacre", None));
        assert_eq!(record.target_type, "$MissionUtil_FactionTag_Pirate;");

        let record = MissionRecord::from(accepted("Mission_Massacre", Some("")));
        assert_eq!(record.target_type, "$MissionUtil_FactionTag_Pirate;");
    }

    #[test]
    fn test_is_massacre() {
        assert!(MissionRecord::from(accepted("Mission_MassacreWing", None)).is_massacre());
        assert!(MissionRecord::from(accepted("Mission_Massacre_RankFed", None)).is_massacre());
        assert!(!MissionRecord::from(accepted("Mission_Courier", None)).is_massacre());
    }
}
