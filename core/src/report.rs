//! Mission table
//!
//! Turns [`AggregateStatistics`] into the rows a front end displays. This is
//! where display-only ratios are derived, so it is also where empty stacks are
//! guarded against.

use std::fmt;

use massacre_types::DisplaySettings;
use massacre_types::formatting::{format_decimal, format_progress, format_reward_pair};

use crate::aggregate::AggregateStatistics;

/// The game caps concurrently accepted missions at 20.
pub const MISSION_LIMIT: i64 = 20;

const COLUMN_GAP: usize = 2;

/// Kills over all missions per kill actually needed. `None` for an empty stack.
pub fn kill_ratio(stats: &AggregateStatistics) -> Option<f64> {
    (stats.stack_height > 0).then(|| stats.target_sum as f64 / stats.stack_height as f64)
}

/// Reward in millions of credits per required kill. `None` for an empty stack.
pub fn reward_per_kill(reward: i64, stats: &AggregateStatistics) -> Option<f64> {
    (stats.stack_height > 0).then(|| reward as f64 / 1_000_000.0 / stats.stack_height as f64)
}

/// Tabular view of the mission statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTable {
    pub header: Vec<String>,
    /// Faction rows followed by the sum rows, each as wide as `header`.
    pub rows: Vec<Vec<String>>,
    /// Full-width lines below the table: summary, mission count, warnings.
    pub notes: Vec<String>,
}

impl SummaryTable {
    pub fn build(stats: &AggregateStatistics, display: &DisplaySettings) -> Self {
        if stats.is_empty() {
            return Self {
                header: Vec::new(),
                rows: Vec::new(),
                notes: vec!["Massacre tracker is ready. No open massacre missions.".to_string()],
            };
        }

        let mut header = vec![
            "Faction".to_string(),
            "R/T".to_string(),
            "KRM/REQ".to_string(),
            "Reward (Wing)".to_string(),
        ];
        if display.delta_column {
            header.push("Δmax".to_string());
        }
        let width = header.len();

        let mut rows = Vec::with_capacity(stats.factions.len() + 2);
        for (name, faction) in &stats.factions {
            let mut row = vec![
                name.clone(),
                format_progress(faction.remaining_missions(), faction.missions),
                format_progress(faction.remaining_kills(), faction.kill_count),
                format_reward_pair(faction.reward, faction.shareable_reward),
            ];
            if display.delta_column {
                row.push(
                    faction
                        .delta(stats.stack_height, stats.before_stack_height)
                        .to_string(),
                );
            }
            rows.push(row);
        }

        if display.sum_row {
            rows.push(pad_row(
                vec![
                    "CompletedSum".to_string(),
                    stats.completed_mission_count.to_string(),
                    stats.completed_kills.to_string(),
                    format_reward_pair(stats.completed_reward, stats.completed_shareable_reward),
                ],
                width,
            ));
            rows.push(pad_row(
                vec![
                    "AcceptedSum".to_string(),
                    stats.mission_count.to_string(),
                    stats.stack_height.to_string(),
                    format_reward_pair(stats.reward, stats.shareable_reward),
                ],
                width,
            ));
        }

        let mut notes = Vec::new();
        if display.ratio_and_cr_per_kill_row {
            if let Some(line) = summary_line(stats) {
                notes.push(line);
            }
        }
        if display.mission_count {
            notes.push(format!(
                "Mission Count: {}/{}",
                stats.mission_count, MISSION_LIMIT
            ));
        }
        notes.extend(stats.warning_messages());
        if display.first_user_help {
            notes.push(help_line(display));
        }

        Self {
            header,
            rows,
            notes,
        }
    }
}

fn summary_line(stats: &AggregateStatistics) -> Option<String> {
    let ratio = kill_ratio(stats)?;
    let per_kill = reward_per_kill(stats.reward, stats)?;
    let wing_per_kill = reward_per_kill(stats.shareable_reward, stats)?;
    Some(format!(
        "Ratio: {}, Reward: {} ({}) M CR/Kill. {} Kills.",
        format_decimal(ratio, 2),
        format_decimal(per_kill, 2),
        format_decimal(wing_per_kill, 2),
        stats.target_sum
    ))
}

fn help_line(display: &DisplaySettings) -> String {
    let mut help =
        "R/T: missions remaining/total. KRM/REQ: kills remaining/required.".to_string();
    if display.delta_column {
        help.push_str(" Δmax: kills behind the highest stack.");
    }
    help
}

fn pad_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.header.is_empty() {
            let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
            for row in &self.rows {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }

            for row in std::iter::once(&self.header).chain(&self.rows) {
                let mut line = String::new();
                for (i, (cell, width)) in row.iter().zip(&widths).enumerate() {
                    line.push_str(cell);
                    if i + 1 < row.len() {
                        let pad = width - cell.chars().count() + COLUMN_GAP;
                        line.extend(std::iter::repeat_n(' ', pad));
                    }
                }
                writeln!(f, "{}", line.trim_end())?;
            }
        }

        for note in &self.notes {
            writeln!(f, "{}", note)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::journal::MissionRecord;
    use crate::scanner::MissionMap;

    fn stats() -> AggregateStatistics {
        let records = [
            ("A", 24, 6_000_000, true, true),
            ("A", 24, 4_000_000, false, false),
            ("B", 40, 10_000_000, true, false),
        ];
        let missions: MissionMap = records
            .iter()
            .enumerate()
            .map(|(i, &(faction, count, reward, is_wing, is_completed))| {
                let id = i as u64 + 1;
                let record = MissionRecord {
                    mission_id: id,
                    source_faction: faction.to_string(),
                    target_faction: "Rebels of Dromi".to_string(),
                    target_type: "Pirates".to_string(),
                    target_system: "Dromi".to_string(),
                    count,
                    reward,
                    is_wing,
                    is_completed,
                    ..Default::default()
                };
                (id, record)
            })
            .collect();
        aggregate(&missions)
    }

    #[test]
    fn test_rows_with_all_settings() {
        let table = SummaryTable::build(&stats(), &DisplaySettings::default());

        assert_eq!(table.header.len(), 5);
        assert_eq!(
            table.rows[0],
            vec!["A", "1/2", "24/48", "10.0 (6.0)", "-8"]
        );
        // B is behind A's 48 kills
        assert_eq!(
            table.rows[1],
            vec!["B", "1/1", "40/40", "10.0 (10.0)", "8"]
        );
        assert_eq!(table.rows[2], vec!["CompletedSum", "1", "24", "6.0 (6.0)", ""]);
        assert_eq!(table.rows[3], vec!["AcceptedSum", "3", "48", "20.0 (16.0)", ""]);

        assert_eq!(
            table.notes[0],
            "Ratio: 1.83, Reward: 0.42 (0.33) M CR/Kill. 88 Kills."
        );
        assert_eq!(table.notes[1], "Mission Count: 3/20");
    }

    #[test]
    fn test_top_faction_delta_is_lead_over_second() {
        let table = SummaryTable::build(&stats(), &DisplaySettings::default());
        // A leads with 48, second highest stack is 40
        assert_eq!(table.rows[0][4], "-8");
        assert_eq!(stats().before_stack_height, 40);
    }

    #[test]
    fn test_hidden_sections() {
        let display = DisplaySettings {
            delta_column: false,
            sum_row: false,
            ratio_and_cr_per_kill_row: false,
            first_user_help: false,
            mission_count: false,
        };
        let table = SummaryTable::build(&stats(), &display);

        assert_eq!(table.header.len(), 4);
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows.iter().all(|row| row.len() == 4));
        assert!(table.notes.is_empty());
    }

    #[test]
    fn test_empty_stack_has_no_ratio() {
        let empty = AggregateStatistics::default();
        assert_eq!(kill_ratio(&empty), None);
        assert_eq!(reward_per_kill(1_000_000, &empty), None);

        let table = SummaryTable::build(&empty, &DisplaySettings::default());
        assert!(table.rows.is_empty());
        assert_eq!(table.notes.len(), 1);
    }

    #[test]
    fn test_display_aligns_columns() {
        let display = DisplaySettings {
            first_user_help: false,
            ..Default::default()
        };
        let rendered = SummaryTable::build(&stats(), &display).to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        // Widest first cell is "CompletedSum"
        assert!(lines[0].starts_with(&format!("{:<14}R/T", "Faction")));
        assert!(lines[1].starts_with(&format!("{:<14}1/2", "A")));
        assert!(lines.contains(&"Mission Count: 3/20"));
    }
}
