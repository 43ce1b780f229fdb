//! Settings store
//!
//! Thin layer over a confy-managed TOML file holding [`MassacreConfig`].
//! Changes applied through [`SettingsStore::apply_changes`] are persisted and
//! then announced to every registered listener.

use std::fmt;
use std::path::{Path, PathBuf};

use massacre_types::{DisplaySettings, MassacreConfig, SettingKey, UnknownSettingKey};
use thiserror::Error;

const APP_NAME: &str = "massacre";
const CONFIG_NAME: &str = "settings";

type ChangeListener = Box<dyn Fn(&MassacreConfig) + Send + Sync>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot locate settings file: {0}")]
    Location(#[source] confy::ConfyError),

    #[error("cannot load settings from {path:?}: {source}")]
    Load {
        path: PathBuf,
        source: confy::ConfyError,
    },

    #[error("cannot save settings to {path:?}: {source}")]
    Store {
        path: PathBuf,
        source: confy::ConfyError,
    },

    #[error(transparent)]
    UnknownKey(#[from] UnknownSettingKey),
}

pub struct SettingsStore {
    path: PathBuf,
    config: MassacreConfig,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SettingsStore {
    /// Open the settings file in the platform config directory.
    pub fn open_default() -> Result<Self, SettingsError> {
        let path = confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
            .map_err(SettingsError::Location)?;
        Self::open(path)
    }

    /// Open (creating with defaults if missing) the settings file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let config = confy::load_path(&path).map_err(|source| SettingsError::Load {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded settings");

        Ok(Self {
            path,
            config,
            listeners: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &MassacreConfig {
        &self.config
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.config.display
    }

    pub fn check_updates(&self) -> bool {
        self.config.check_updates
    }

    pub fn get(&self, key: SettingKey) -> bool {
        self.config.get(key)
    }

    /// Change a value in memory. Call [`save`](Self::save) to persist it.
    pub fn set(&mut self, key: SettingKey, value: bool) {
        self.config.set(key, value);
    }

    /// Configured journal directory, else the game's default location.
    pub fn journal_dir(&self) -> Option<PathBuf> {
        self.config
            .journal_dir
            .clone()
            .filter(|dir| !dir.as_os_str().is_empty())
            .or_else(default_journal_dir)
    }

    pub fn set_journal_dir(&mut self, dir: Option<PathBuf>) {
        self.config.journal_dir = dir;
    }

    /// Register a callback run after every applied change set.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: Fn(&MassacreConfig) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        confy::store_path(&self.path, &self.config).map_err(|source| SettingsError::Store {
            path: self.path.clone(),
            source,
        })
    }

    /// Set every value in `changes`, persist, then notify listeners.
    pub fn apply_changes(&mut self, changes: &[(SettingKey, bool)]) -> Result<(), SettingsError> {
        for &(key, value) in changes {
            self.config.set(key, value);
        }
        self.save()?;

        tracing::info!(changed = changes.len(), "Settings updated");
        for listener in &self.listeners {
            listener(&self.config);
        }
        Ok(())
    }

    /// Parse a key name and value as given on the command line and apply it.
    pub fn apply_named(&mut self, key: &str, value: bool) -> Result<(), SettingsError> {
        let key: SettingKey = key.parse()?;
        self.apply_changes(&[(key, value)])
    }
}

/// Where the game writes its journals by default.
pub fn default_journal_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join("Saved Games")
            .join("Frontier Developments")
            .join("Elite Dangerous")
    })
}
