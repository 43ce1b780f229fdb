use serde::Serialize;

use crate::journal::MissionRecord;

/// Running totals for the missions issued by one faction.
///
/// `completed_missions <= missions` and `completed_kills <= kill_count`
/// hold because kill counts are unsigned and completed figures are only ever
/// added alongside the totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactionState {
    pub missions: i64,
    pub completed_missions: i64,
    /// Kills required across all of this faction's missions.
    pub kill_count: i64,
    /// Kills required by missions that are already redirected.
    pub completed_kills: i64,
    pub reward: i64,
    /// Reward from wing missions only.
    pub shareable_reward: i64,
}

impl FactionState {
    /// Sums saturate: counts and rewards come straight from journal files.
    pub(super) fn add(&mut self, mission: &MissionRecord) {
        let count = i64::from(mission.count);

        self.missions = self.missions.saturating_add(1);
        if mission.is_completed {
            self.completed_missions = self.completed_missions.saturating_add(1);
            self.completed_kills = self.completed_kills.saturating_add(count);
        }

        self.kill_count = self.kill_count.saturating_add(count);
        self.reward = self.reward.saturating_add(mission.reward);
        if mission.is_wing {
            self.shareable_reward = self.shareable_reward.saturating_add(mission.reward);
        }
    }

    pub fn remaining_missions(&self) -> i64 {
        self.missions - self.completed_missions
    }

    pub fn remaining_kills(&self) -> i64 {
        self.kill_count - self.completed_kills
    }

    /// Distance to the tallest stack.
    ///
    /// Positive for factions below the top. The top faction gets the
    /// (non-positive) lead it holds over the second-highest stack.
    pub fn delta(&self, stack_height: i64, before_stack_height: i64) -> i64 {
        let delta = stack_height - self.kill_count;
        if delta > 0 {
            delta
        } else {
            before_stack_height - stack_height
        }
    }
}
