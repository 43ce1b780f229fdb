//! Persisted configuration.
//!
//! Every boolean toggle defaults to `true` so a fresh install shows the full table.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassacreConfig {
    /// Journal directory override. `None` falls back to the platform default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_dir: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub check_updates: bool,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl Default for MassacreConfig {
    fn default() -> Self {
        Self {
            journal_dir: None,
            check_updates: true,
            display: DisplaySettings::default(),
        }
    }
}

impl MassacreConfig {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::CheckUpdates => self.check_updates,
            SettingKey::DisplayDeltaColumn => self.display.delta_column,
            SettingKey::DisplaySumRow => self.display.sum_row,
            SettingKey::DisplayRatioAndCrPerKillRow => self.display.ratio_and_cr_per_kill_row,
            SettingKey::DisplayFirstUserHelp => self.display.first_user_help,
            SettingKey::DisplayMissionCount => self.display.mission_count,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        let slot = match key {
            SettingKey::CheckUpdates => &mut self.check_updates,
            SettingKey::DisplayDeltaColumn => &mut self.display.delta_column,
            SettingKey::DisplaySumRow => &mut self.display.sum_row,
            SettingKey::DisplayRatioAndCrPerKillRow => &mut self.display.ratio_and_cr_per_kill_row,
            SettingKey::DisplayFirstUserHelp => &mut self.display.first_user_help,
            SettingKey::DisplayMissionCount => &mut self.display.mission_count,
        };
        *slot = value;
    }
}

/// Which parts of the mission table are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Distance of each faction to the highest stack.
    #[serde(default = "default_true")]
    pub delta_column: bool,

    /// Completed and accepted sum rows.
    #[serde(default = "default_true")]
    pub sum_row: bool,

    /// Kill ratio and credits-per-kill line.
    #[serde(default = "default_true")]
    pub ratio_and_cr_per_kill_row: bool,

    #[serde(default = "default_true")]
    pub first_user_help: bool,

    #[serde(default = "default_true")]
    pub mission_count: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            delta_column: true,
            sum_row: true,
            ratio_and_cr_per_kill_row: true,
            first_user_help: true,
            mission_count: true,
        }
    }
}

/// Name of a boolean setting, as used on the command line and in change sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    CheckUpdates,
    DisplayDeltaColumn,
    DisplaySumRow,
    DisplayRatioAndCrPerKillRow,
    DisplayFirstUserHelp,
    DisplayMissionCount,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::CheckUpdates,
        SettingKey::DisplayDeltaColumn,
        SettingKey::DisplaySumRow,
        SettingKey::DisplayRatioAndCrPerKillRow,
        SettingKey::DisplayFirstUserHelp,
        SettingKey::DisplayMissionCount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::CheckUpdates => "check_updates",
            SettingKey::DisplayDeltaColumn => "display_delta_column",
            SettingKey::DisplaySumRow => "display_sum_row",
            SettingKey::DisplayRatioAndCrPerKillRow => "display_ratio_and_cr_per_kill_row",
            SettingKey::DisplayFirstUserHelp => "display_first_user_help",
            SettingKey::DisplayMissionCount => "display_mission_count",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a setting name does not match any [`SettingKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSettingKey(pub String);

impl fmt::Display for UnknownSettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown setting '{}'", self.0)
    }
}

impl std::error::Error for UnknownSettingKey {}

impl FromStr for SettingKey {
    type Err = UnknownSettingKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSettingKey(s.to_string()))
    }
}
