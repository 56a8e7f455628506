use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directory_engine::ApiSettings;
use directory_logging::{dir_debug, dir_info, LogDestination};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SETTINGS_FILE: &str = "directory.ron";
pub const API_URL_ENV: &str = "DIRECTORY_API_URL";

/// Contents of `directory.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
}

impl Default for Settings {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: None,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            log_destination: LogDestination::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings from {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid settings in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Reads the settings file. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            dir_debug!("no settings file at {:?}; using defaults", path);
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let settings = ron::from_str(&content).map_err(|err| SettingsError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    dir_info!("loaded settings from {:?}", path);
    Ok(settings)
}

impl Settings {
    /// Client settings, with the base url taken from the first non-blank of
    /// the flag, the environment, then the file.
    pub fn api_settings(&self, flag_url: Option<&str>, env_url: Option<&str>) -> ApiSettings {
        let defaults = ApiSettings::default();
        let base_url = [flag_url, env_url, self.base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .map_or(defaults.base_url, str::to_string);

        ApiSettings {
            base_url,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..defaults
        }
    }
}
