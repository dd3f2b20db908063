//! Shared configuration for addressbook front ends.
//!
//! A TOML file in the platform config directory, overridden by
//! `ADDRESSBOOK_*` environment variables, translated into
//! `addressbook_core::LookupConfig` and a storage location.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use addressbook_core::store::DEFAULT_STORAGE_KEY;
use addressbook_core::LookupConfig;

pub const ENV_PREFIX: &str = "ADDRESSBOOK_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no address API base URL configured")]
    MissingBaseUrl,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Root of the address lookup backend (e.g. "http://localhost:3000").
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Custom CA certificate for the backend.
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: default_timeout(),
            ca_cert: None,
            storage: StorageConfig::default(),
        }
    }
}

/// Where the address book is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Data directory; defaults to the platform data dir.
    pub dir: Option<PathBuf>,

    /// Storage key (file stem) of the address book.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_storage_key(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.into()
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "addressbook", "addressbook")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    for part in parts {
        p.push(part);
    }
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", "addressbook", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default directory for persisted data.
pub fn default_data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", "addressbook"]),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(figment_for(path).extract()?)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core types ───────────────────────────────────────

impl Config {
    /// Build the core `LookupConfig`. A base URL is mandatory.
    pub fn to_lookup_config(&self) -> Result<LookupConfig, ConfigError> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;

        let url: url::Url = raw.parse().map_err(|e| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL '{raw}': {e}"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("expected an http(s) URL, got '{raw}'"),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let mut lookup = LookupConfig::new(url).with_timeout(Duration::from_secs(self.timeout));
        lookup.ca_cert.clone_from(&self.ca_cert);
        Ok(lookup)
    }

    /// Directory holding the persisted address book.
    pub fn data_dir(&self) -> PathBuf {
        self.storage.dir.clone().unwrap_or_else(default_data_dir)
    }
}
