//! Config file location and settings resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use onthisday_core::fetch::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, AppConfig, ViewMode};
use crate::errors::CliError;
use crate::helpers::Category;

/// Where the config file lives and whether the user asked for it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    /// Set via `ONTHISDAY_CONFIG`; a missing file is then an error
    pub explicit: bool,
}

/// Resolve the config file path, checking ONTHISDAY_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<ConfigLocation> {
    if let Ok(value) = std::env::var("ONTHISDAY_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(ConfigLocation {
                path: PathBuf::from(value),
                explicit: true,
            });
        }
    }
    Ok(ConfigLocation {
        path: default_config_path()?,
        explicit: false,
    })
}

/// Load config from `location`. A missing default file means defaults.
pub fn load_config(location: &ConfigLocation) -> anyhow::Result<AppConfig> {
    if !location.path.exists() {
        if location.explicit {
            return Err(CliError::not_found(
                missing_config_message(&location.path),
                "Unset ONTHISDAY_CONFIG or create the file.",
            )
            .into());
        }
        tracing::debug!(path = %location.path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }
    tracing::debug!(path = %location.path.display(), "reading config");
    read_config(&location.path).map_err(|e| CliError::invalid_input(e.to_string()).into())
}

/// Error message when an explicitly named config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!("No config file found at {}", config_path.display())
}

/// Effective settings after applying flag > env > file > default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub view: ViewMode,
    pub show_totals: bool,
    pub default_category: Category,
}

impl Settings {
    /// Merge CLI flags (which already include their env fallbacks) over the
    /// config file.
    pub fn resolve(cli: &Cli, config: &AppConfig) -> Self {
        let base_url = cli
            .base_url
            .clone()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| config.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = Duration::from_secs(
            config
                .api
                .timeout_seconds
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        );

        Self {
            base_url,
            timeout,
            view: config.ui.view,
            show_totals: config.ui.show_totals,
            default_category: config.ui.default_type,
        }
    }
}
