//! Persisted user settings
//!
//! Settings are stored in `config.toml` under the platform config directory
//! (`~/.config/lin/` on Linux), or under `$LIN_CONFIG_DIR` when set.
//!
//! ```toml
//! [truncation]
//! maxLength = 300
//!
//! [pagination]
//! defaultPageSize = 100
//! ```

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::MAX_PAGE_SIZE;
use crate::render::{DEFAULT_MAX_LENGTH, DEFAULT_PAGE_SIZE};

/// Environment variable overriding the settings directory
pub const CONFIG_DIR_ENV: &str = "LIN_CONFIG_DIR";

const SETTINGS_FILE: &str = "config.toml";

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("Unknown setting: {key}. Valid keys: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value: {value}. {constraint}")]
    InvalidValue {
        value: String,
        constraint: &'static str,
    },

    #[error("Failed to parse settings: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TruncationSettings {
    /// Characters kept before truncating description/body/content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationSettings {
    /// Results per page for list and search commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_page_size: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub truncation: TruncationSettings,
    pub pagination: PaginationSettings,
}

/// A dotted setting key as accepted by `lin config`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    TruncationMaxLength,
    PaginationDefaultPageSize,
}

impl SettingKey {
    pub const ALL: [SettingKey; 2] = [
        SettingKey::TruncationMaxLength,
        SettingKey::PaginationDefaultPageSize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::TruncationMaxLength => "truncation.maxLength",
            SettingKey::PaginationDefaultPageSize => "pagination.defaultPageSize",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SettingKey::TruncationMaxLength => {
                "Max characters before truncating description/body/content fields (default: 200)"
            }
            SettingKey::PaginationDefaultPageSize => {
                "Default number of results for list/search commands (default: 50)"
            }
        }
    }

    /// Value in effect when the setting is unset
    pub fn default_value(&self) -> usize {
        match self {
            SettingKey::TruncationMaxLength => DEFAULT_MAX_LENGTH,
            SettingKey::PaginationDefaultPageSize => DEFAULT_PAGE_SIZE,
        }
    }

    pub fn get(&self, settings: &Settings) -> Option<usize> {
        match self {
            SettingKey::TruncationMaxLength => settings.truncation.max_length,
            SettingKey::PaginationDefaultPageSize => settings.pagination.default_page_size,
        }
    }

    /// Validates `raw` and stores it, returning the parsed value
    pub fn set(&self, settings: &mut Settings, raw: &str) -> Result<usize, SettingsError> {
        let value = self.parse(raw)?;
        match self {
            SettingKey::TruncationMaxLength => settings.truncation.max_length = Some(value),
            SettingKey::PaginationDefaultPageSize => {
                settings.pagination.default_page_size = Some(value)
            }
        }
        Ok(value)
    }

    pub fn clear(&self, settings: &mut Settings) {
        match self {
            SettingKey::TruncationMaxLength => settings.truncation.max_length = None,
            SettingKey::PaginationDefaultPageSize => settings.pagination.default_page_size = None,
        }
    }

    fn parse(&self, raw: &str) -> Result<usize, SettingsError> {
        let invalid = |constraint| SettingsError::InvalidValue {
            value: raw.to_string(),
            constraint,
        };

        match self {
            SettingKey::TruncationMaxLength => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid("Must be a non-negative integer.")),
            SettingKey::PaginationDefaultPageSize => parse_page_size(raw),
        }
    }

    fn valid_keys() -> String {
        Self::ALL
            .iter()
            .map(SettingKey::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parses a page size: an integer between 1 and the service's page cap
///
/// Shared by `pagination.defaultPageSize` and the `--limit` flag.
pub fn parse_page_size(raw: &str) -> Result<usize, SettingsError> {
    const RANGE: &str = "Must be an integer between 1 and 250.";
    let invalid = || SettingsError::InvalidValue {
        value: raw.to_string(),
        constraint: RANGE,
    };

    let n = raw.trim().parse::<usize>().map_err(|_| invalid())?;
    if (1..=MAX_PAGE_SIZE).contains(&n) {
        Ok(n)
    } else {
        Err(invalid())
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownKey {
                key: s.to_string(),
                valid: Self::valid_keys(),
            })
    }
}

/// Reads and writes the settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    /// Creates a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Opens the store at `$LIN_CONFIG_DIR` or the platform config directory
    pub fn open_default() -> Result<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::new(dir));
        }

        let dirs = ProjectDirs::from("", "", "lin")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(Self::new(dirs.config_dir()))
    }

    /// Returns the path to the settings file
    pub fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads settings; a missing file means defaults
    pub fn load(&self) -> Result<Settings> {
        let path = self.path();
        if !path.exists() {
            return Ok(Settings::default());
        }

        let mut file = File::open(&path)
            .with_context(|| format!("Failed to open settings: {}", path.display()))?;
        file.lock_shared()
            .context("Failed to acquire read lock on settings")?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| SettingsError::Parse(e.to_string()))
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }

    /// Writes settings atomically (temp file + rename)
    pub fn save(&self, settings: &Settings) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create config directory: {}", self.dir.display())
        })?;

        let path = self.path();
        let temp_path = path.with_extension("toml.tmp");
        let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on settings")?;
            file.write_all(content.as_bytes())
                .context("Failed to write settings")?;
            file.flush().context("Failed to flush settings")?;
        }

        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace settings: {}", path.display()))
    }

    /// Restores defaults, or clears a single key
    pub fn reset(&self, key: Option<SettingKey>) -> Result<Settings> {
        let settings = match key {
            Some(key) => {
                let mut settings = self.load()?;
                key.clear(&mut settings);
                settings
            }
            None => Settings::default(),
        };
        self.save(&settings)?;
        Ok(settings)
    }
}
