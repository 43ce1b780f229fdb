//! Mission statistics
//!
//! Folds one commander's open missions into per-faction totals plus the
//! scan-wide figures used to decide where to turn in kills. Nothing here
//! divides: ratios are left to the table, which guards against empty stacks.

mod faction;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::journal::MissionRecord;
use crate::scanner::MissionMap;

pub use faction::FactionState;

/// Advisory raised when a mission stack mixes targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StackWarning {
    MultipleTargetFactions(Vec<String>),
    MultipleTargetTypes(Vec<String>),
    MultipleTargetSystems(Vec<String>),
}

impl fmt::Display for StackWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, values) = match self {
            StackWarning::MultipleTargetFactions(v) => ("Multiple Target Factions", v),
            StackWarning::MultipleTargetTypes(v) => ("Multiple Target Types", v),
            StackWarning::MultipleTargetSystems(v) => ("Multiple Target Systems", v),
        };
        write!(f, "{}: {}!", label, values.join(", "))
    }
}

/// Aggregated view over a set of open missions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStatistics {
    /// Per issuing faction, sorted by faction name.
    pub factions: BTreeMap<String, FactionState>,
    pub mission_count: i64,
    /// Sum of required kills over every mission, ignoring faction grouping.
    pub target_sum: i64,
    /// Highest per-faction kill count: the kills actually needed.
    pub stack_height: i64,
    /// Highest per-faction kill count below `stack_height`, or `stack_height`
    /// when every faction is tied at the top.
    pub before_stack_height: i64,
    pub reward: i64,
    pub shareable_reward: i64,
    pub completed_mission_count: i64,
    pub completed_reward: i64,
    pub completed_shareable_reward: i64,
    /// Highest per-faction completed kill count (a maximum, not a sum): how far
    /// the most advanced faction has progressed.
    pub completed_kills: i64,
    pub warnings: Vec<StackWarning>,
}

/// Fold `missions` into statistics. See [`AggregateStatistics::from_missions`].
pub fn aggregate(missions: &MissionMap) -> AggregateStatistics {
    AggregateStatistics::from_missions(missions)
}

impl AggregateStatistics {
    /// Missions are folded in ascending id order so warning lists are stable.
    pub fn from_missions(missions: &MissionMap) -> Self {
        let mut ordered: Vec<&MissionRecord> = missions.values().collect();
        ordered.sort_by_key(|mission| mission.mission_id);

        log_input(&ordered);

        let mut stats = AggregateStatistics {
            mission_count: ordered.len() as i64,
            ..Default::default()
        };

        let mut target_factions: Vec<&str> = Vec::new();
        let mut target_types: Vec<&str> = Vec::new();
        let mut target_systems: Vec<&str> = Vec::new();

        for mission in ordered.iter().copied() {
            let faction = stats
                .factions
                .entry(mission.source_faction.clone())
                .or_default();
            faction.add(mission);

            if mission.is_completed {
                stats.completed_reward = stats.completed_reward.saturating_add(mission.reward);
                if mission.is_wing {
                    stats.completed_shareable_reward =
                        stats.completed_shareable_reward.saturating_add(mission.reward);
                }
            }
            stats.target_sum = stats.target_sum.saturating_add(i64::from(mission.count));
            stats.stack_height = stats.stack_height.max(faction.kill_count);

            push_distinct(&mut target_factions, &mission.target_faction);
            push_distinct(&mut target_types, &mission.target_type);
            push_distinct(&mut target_systems, &mission.target_system);
        }

        for faction in stats.factions.values() {
            stats.reward = stats.reward.saturating_add(faction.reward);
            stats.shareable_reward = stats.shareable_reward.saturating_add(faction.shareable_reward);
            stats.completed_mission_count += faction.completed_missions;
            stats.completed_kills = stats.completed_kills.max(faction.completed_kills);
        }

        if target_factions.len() > 1 {
            stats
                .warnings
                .push(StackWarning::MultipleTargetFactions(to_owned(&target_factions)));
        }
        if target_types.len() > 1 {
            stats
                .warnings
                .push(StackWarning::MultipleTargetTypes(to_owned(&target_types)));
        }
        if target_systems.len() > 1 {
            stats
                .warnings
                .push(StackWarning::MultipleTargetSystems(to_owned(&target_systems)));
        }

        stats.before_stack_height = stats
            .factions
            .values()
            .map(|faction| faction.kill_count)
            .filter(|&kills| kills < stats.stack_height)
            .max()
            .unwrap_or(stats.stack_height);

        stats
    }

    /// True when no kills are required, i.e. nothing to show.
    pub fn is_empty(&self) -> bool {
        self.target_sum == 0
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

fn push_distinct<'a>(values: &mut Vec<&'a str>, value: &'a str) {
    if !values.contains(&value) {
        values.push(value);
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Dump the input at debug level; search the log for MASSACRE_MISSION_DATA_INPUT.
fn log_input(missions: &[&MissionRecord]) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    match serde_json::to_string(missions) {
        Ok(json) => tracing::debug!(missions = %json, "MASSACRE_MISSION_DATA_INPUT"),
        Err(e) => tracing::error!(error = %e, "Failed to serialize mission data input"),
    }
}
