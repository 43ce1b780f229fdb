mod commands;
mod logging;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use massacre_core::SettingsStore;
use massacre_core::version::{self, DOWNLOAD_URL, VERSION_URL};

#[derive(Parser)]
#[command(version, about = "Massacre mission stack tracker for Elite Dangerous journals")]
struct Cli {
    /// Journal directory (defaults to the configured or game default location)
    #[arg(long, global = true)]
    journal_dir: Option<PathBuf>,

    /// Only read journals modified after this date (YYYY-MM-DD)
    #[arg(long, global = true, conflicts_with = "days")]
    since: Option<NaiveDate>,

    /// Only read journals modified in the last N days
    #[arg(long, global = true)]
    days: Option<u32>,

    /// Commander to report on (defaults to the last one seen)
    #[arg(long, global = true)]
    cmdr: Option<String>,

    /// Include non-massacre missions
    #[arg(long, global = true)]
    all_missions: bool,

    #[arg(long, global = true)]
    no_update_check: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the mission stack table (default)
    Report,
    /// List commanders with open missions
    Commanders,
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Check for a newer release and open the download page if there is one
    Update,
}

#[derive(Subcommand)]
enum SettingsCommand {
    Show,
    Set {
        key: String,
        #[arg(action = ArgAction::Set)]
        value: bool,
    },
    /// Set the journal directory, or reset it to the game default when omitted
    JournalDir { path: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();
    let _log_guard = logging::init_logging(cli.log_file.as_deref());

    let mut store = SettingsStore::open_default().map_err(|e| e.to_string())?;
    store.on_change(|config| {
        tracing::debug!(display = ?config.display, check_updates = config.check_updates, "Settings changed");
    });

    let list_commanders = match cli.command.unwrap_or(Commands::Report) {
        Commands::Settings(SettingsCommand::Show) => {
            commands::show_settings(&store);
            return Ok(());
        }
        Commands::Settings(SettingsCommand::Set { key, value }) => {
            return commands::set_setting(&mut store, &key, value);
        }
        Commands::Settings(SettingsCommand::JournalDir { path }) => {
            return commands::set_journal_dir(&mut store, path.as_deref());
        }
        Commands::Update => {
            let outdated = version::spawn_version_check(env!("CARGO_PKG_VERSION"), VERSION_URL)
                .await
                .unwrap_or(false);
            if outdated {
                println!("A newer release is available, opening {DOWNLOAD_URL}");
                version::open_download_page().await;
            } else {
                println!("massacre {} is up to date", env!("CARGO_PKG_VERSION"));
            }
            return Ok(());
        }
        Commands::Report => false,
        Commands::Commanders => true,
    };

    let version_check = (store.check_updates() && !cli.no_update_check)
        .then(|| version::spawn_version_check(env!("CARGO_PKG_VERSION"), VERSION_URL));

    let dir = cli
        .journal_dir
        .or_else(|| store.journal_dir())
        .ok_or("No journal directory configured and no home directory found")?;
    let cutoff = commands::resolve_cutoff(cli.since, cli.days, Local::now().date_naive());
    tracing::info!(dir = %dir.display(), %cutoff, "Scanning journals");

    if list_commanders {
        commands::list_commanders(dir, cutoff).await?;
    } else {
        commands::report(&store, dir, cutoff, cli.cmdr.as_deref(), cli.all_missions).await?;
    }

    if let Some(rx) = version_check {
        if rx.await.unwrap_or(false) {
            println!();
            println!("Massacre tracker is outdated. Download the latest release at {DOWNLOAD_URL}");
        }
    }

    Ok(())
}
