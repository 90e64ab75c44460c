//! Configuration loading and parsing.
//!
//! Parses `vikey.toml` (or an override path provided by the binary) into
//! dispatcher tunables:
//!
//! ```toml
//! [dispatch]
//! page_jump = 20
//! max_command_keys = 2
//! count_limit = 999999
//! ```
//!
//! Missing files and missing fields fall back to defaults. A file that fails to
//! parse also falls back to defaults (logged at WARN) so a typo never prevents
//! startup. Values that parse but make no sense (zero page jump, zero key
//! buffer) are rejected with [`ConfigError`].

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "vikey.toml";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("dispatch.{field} must be at least 1 (got {value})")]
    BelowMinimum { field: &'static str, value: u64 },
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Lines moved by page-up / page-down motions.
    #[serde(default = "DispatchConfig::default_page_jump")]
    pub page_jump: usize,
    /// Unmatched command keys buffered before the sequence is rejected.
    #[serde(default = "DispatchConfig::default_max_command_keys")]
    pub max_command_keys: usize,
    /// Saturation point for repeat counts.
    #[serde(default = "DispatchConfig::default_count_limit")]
    pub count_limit: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            page_jump: Self::default_page_jump(),
            max_command_keys: Self::default_max_command_keys(),
            count_limit: Self::default_count_limit(),
        }
    }
}

impl DispatchConfig {
    const fn default_page_jump() -> usize {
        20
    }
    const fn default_max_command_keys() -> usize {
        2
    }
    const fn default_count_limit() -> u32 {
        999_999
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("page_jump", self.page_jump as u64),
            ("max_command_keys", self.max_command_keys as u64),
            ("count_limit", u64::from(self.count_limit)),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::BelowMinimum { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile, // parsed (or default) data
    pub source: Option<PathBuf>,
}

impl Config {
    pub fn dispatch(&self) -> &DispatchConfig {
        &self.file.dispatch
    }
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vikey").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    let file = match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => file,
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            return Ok(Config::default());
        }
    };
    file.dispatch.validate()?;
    info!(
        target: "config",
        path = %path.display(),
        page_jump = file.dispatch.page_jump,
        max_command_keys = file.dispatch.max_command_keys,
        count_limit = file.dispatch.count_limit,
        "config_loaded"
    );
    Ok(Config {
        file,
        source: Some(path),
    })
}
