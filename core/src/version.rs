//! Update check
//!
//! Fetches the published version string and compares it with the running one
//! on a background task. The result comes back over a oneshot channel; any
//! failure counts as "not outdated".

use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;

pub const VERSION_URL: &str =
    "https://raw.githubusercontent.com/ckx000/EDMC-Massacres/master/version";
pub const DOWNLOAD_URL: &str = "https://github.com/ckx000/EDMC-Massacres/releases";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("version request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid version string '{version}': {source}")]
    Invalid {
        version: String,
        source: ParseIntError,
    },
}

fn parse_version(version: &str) -> Result<Vec<u64>, VersionError> {
    let version = version.trim();
    version
        .split('.')
        .map(|part| {
            part.trim().parse::<u64>().map_err(|source| VersionError::Invalid {
                version: version.to_string(),
                source,
            })
        })
        .collect()
}

/// Whether `remote` is newer than `current`.
///
/// Versions are dot-separated integers; the shorter one is padded with zeros,
/// so `1.0` and `1.0.0` are equal.
pub fn is_outdated(current: &str, remote: &str) -> Result<bool, VersionError> {
    let mut current = parse_version(current)?;
    let mut remote = parse_version(remote)?;

    let len = current.len().max(remote.len());
    current.resize(len, 0);
    remote.resize(len, 0);

    Ok(remote > current)
}

/// Download the published version string.
pub async fn fetch_remote_version(url: &str) -> Result<String, VersionError> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}

async fn check(current: &str, url: &str) -> bool {
    let remote = match fetch_remote_version(url).await {
        Ok(remote) => remote,
        Err(e) => {
            tracing::error!(error = %e, "Failed to get version from remote, ignoring");
            return false;
        }
    };

    match is_outdated(current, &remote) {
        Ok(outdated) => {
            tracing::debug!(current, remote = remote.trim(), outdated, "Version check done");
            outdated
        }
        Err(e) => {
            tracing::warn!(error = %e, "Cannot compare versions, ignoring");
            false
        }
    }
}

/// Check `current` against `url` on a tokio task.
///
/// Must be called from within a tokio runtime. The receiver yields `true` only
/// when the remote version is newer.
pub fn spawn_version_check(current: impl Into<String>, url: impl Into<String>) -> oneshot::Receiver<bool> {
    let (tx, rx) = oneshot::channel();
    let current = current.into();
    let url = url.into();

    tokio::spawn(async move {
        let outdated = check(&current, &url).await;
        // Receiver may have been dropped if the caller stopped waiting
        tx.send(outdated).ok();
    });

    rx
}

/// Open the release page in the system browser.
pub async fn open_download_page() {
    #[cfg(target_os = "macos")]
    let mut command = tokio::process::Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = tokio::process::Command::new("explorer");
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = tokio::process::Command::new("xdg-open");

    match command.arg(DOWNLOAD_URL).status().await {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::warn!(exit_code = ?status.code(), "Browser launcher failed"),
        Err(e) => tracing::error!(error = %e, "Failed to open URL"),
    }
}
