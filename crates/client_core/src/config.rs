use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use crate::endpoints::Environment;

pub const DEFAULT_SETTINGS_FILE: &str = "turl.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// Explicit service base URL. `None` selects the local default.
    pub api_base_url: Option<String>,
    pub environment: Environment,
    pub request_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base_url: Option<String>,
    environment: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Resolves settings once at startup: defaults, then the settings file, then
/// environment variables.
///
/// An explicitly named file must exist; the default `turl.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    match path {
        Some(path) => apply_file(&mut settings, path)?,
        None => {
            let default_path = Path::new(DEFAULT_SETTINGS_FILE);
            if default_path.exists() {
                apply_file(&mut settings, default_path)?;
            }
        }
    }

    apply_env(&mut settings, lookup)?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, path: &Path) -> Result<(), SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    apply_toml(settings, &raw, path)
}

fn apply_toml(settings: &mut Settings, raw: &str, path: &Path) -> Result<(), SettingsError> {
    let file_cfg: FileSettings = toml::from_str(raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = non_empty(v);
    }
    if let Some(v) = file_cfg.environment {
        settings.environment = parse_environment(&v)?;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), SettingsError> {
    if let Some(v) = lookup("TURL_API_BASE_URL") {
        settings.api_base_url = non_empty(v);
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = non_empty(v);
    }

    if let Some(v) = lookup("TURL_ENV") {
        settings.environment = parse_environment(&v)?;
    }
    if let Some(v) = lookup("APP__ENV") {
        settings.environment = parse_environment(&v)?;
    }

    if let Some(v) = lookup("TURL_REQUEST_TIMEOUT_SECS") {
        let parsed = v
            .trim()
            .parse::<u64>()
            .map_err(|_| SettingsError::InvalidValue {
                key: "TURL_REQUEST_TIMEOUT_SECS",
                value: v.clone(),
            })?;
        settings.request_timeout_secs = Some(parsed);
    }

    Ok(())
}

fn parse_environment(raw: &str) -> Result<Environment, SettingsError> {
    raw.parse().map_err(|_| SettingsError::InvalidValue {
        key: "environment",
        value: raw.to_string(),
    })
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
