use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use massacre_core::scanner::{self, CommanderMissions, MissionMap};
use massacre_core::{SettingsStore, SummaryTable, aggregate, massacre_only};
use massacre_types::SettingKey;

/// Journals are kept this far back when no cutoff is given.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 14;

/// Result of a commander-partitioned scan.
#[derive(Debug, Default)]
pub struct CommanderScan {
    /// Commander active at the end of the newest journal.
    pub last_commander: Option<String>,
    pub missions: HashMap<String, MissionMap>,
}

pub fn resolve_cutoff(since: Option<NaiveDate>, days: Option<u32>, today: NaiveDate) -> NaiveDate {
    match (since, days) {
        (Some(date), _) => date,
        (None, Some(days)) => today - Duration::days(i64::from(days)),
        (None, None) => today - Duration::days(i64::from(DEFAULT_LOOKBACK_DAYS)),
    }
}

/// Scan on the blocking pool; journal reading is plain file IO.
pub async fn scan_commanders(dir: PathBuf, cutoff: NaiveDate) -> Result<CommanderScan, String> {
    let scan = tokio::task::spawn_blocking(move || {
        let mut handler = CommanderMissions::new();
        scanner::scan_into(&dir, cutoff, &mut handler)?;
        let last_commander = handler.current_commander().map(str::to_string);
        Ok::<_, scanner::ScanError>(CommanderScan {
            last_commander,
            missions: handler.finish().into_iter().collect(),
        })
    })
    .await
    .map_err(|e| format!("Scan task failed: {e}"))?
    .map_err(|e| e.to_string())?;

    tracing::info!(
        commanders = scan.missions.len(),
        last = scan.last_commander.as_deref().unwrap_or("-"),
        "Journal scan complete"
    );
    Ok(scan)
}

/// Commander to report on: the requested one, else whoever played last.
pub fn select_commander<'a>(scan: &'a CommanderScan, requested: Option<&'a str>) -> Option<&'a str> {
    requested.or(scan.last_commander.as_deref())
}

pub async fn report(
    store: &SettingsStore,
    dir: PathBuf,
    cutoff: NaiveDate,
    cmdr: Option<&str>,
    all_missions: bool,
) -> Result<(), String> {
    let scan = scan_commanders(dir, cutoff).await?;

    let Some(commander) = select_commander(&scan, cmdr) else {
        println!("No commander found in journals after {cutoff}");
        return Ok(());
    };

    let missions = scan.missions.get(commander).cloned().unwrap_or_default();
    let missions = if all_missions {
        missions
    } else {
        massacre_only(missions)
    };

    let stats = aggregate(&missions);
    println!("CMDR {commander}");
    print!("{}", SummaryTable::build(&stats, store.display()));
    Ok(())
}

pub async fn list_commanders(dir: PathBuf, cutoff: NaiveDate) -> Result<(), String> {
    let scan = scan_commanders(dir, cutoff).await?;
    if scan.missions.is_empty() {
        println!("No open missions in journals after {cutoff}");
        return Ok(());
    }

    let mut names: Vec<&String> = scan.missions.keys().collect();
    names.sort();
    for name in names {
        let missions = &scan.missions[name];
        let massacres = missions.values().filter(|m| m.is_massacre()).count();
        let marker = if scan.last_commander.as_ref() == Some(name) {
            " *"
        } else {
            ""
        };
        println!(
            "{name}{marker}: {} open missions ({massacres} massacre)",
            missions.len()
        );
    }
    Ok(())
}

pub fn show_settings(store: &SettingsStore) {
    println!("Settings file: {}", store.path().display());
    match store.journal_dir() {
        Some(dir) => println!("journal_dir = {}", dir.display()),
        None => println!("journal_dir = (unset)"),
    }
    for key in SettingKey::ALL {
        println!("{} = {}", key, store.get(key));
    }
}

pub fn set_setting(store: &mut SettingsStore, key: &str, value: bool) -> Result<(), String> {
    store.apply_named(key, value).map_err(|e| e.to_string())?;
    println!("{key} = {value}");
    Ok(())
}

pub fn set_journal_dir(store: &mut SettingsStore, dir: Option<&Path>) -> Result<(), String> {
    store.set_journal_dir(dir.map(Path::to_path_buf));
    store.save().map_err(|e| e.to_string())?;
    match dir {
        Some(dir) => println!("journal_dir = {}", dir.display()),
        None => println!("journal_dir reset to the game default"),
    }
    Ok(())
}
