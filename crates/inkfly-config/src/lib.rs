//! Shared configuration for the inkfly CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `inkfly_core::StudioConfig`. The CLI adds
//! flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use inkfly_core::{Credentials, DEFAULT_API_URL, DEFAULT_RASTER_URL, StudioConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("missing credentials for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("could not load config: {0}")]
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
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named provider profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Discovery cache freshness horizon, in hours.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_hours: i64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            cache_ttl_hours: default_cache_ttl(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_cache_ttl() -> i64 {
    inkfly_core::DEFAULT_TTL_HOURS
}

/// A named provider profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Public API key identifying the tenant.
    pub api_key: Option<String>,

    /// Signing secret (plaintext, prefer keyring or env var).
    pub secret_key: Option<String>,

    /// Environment variable name containing the signing secret.
    pub secret_key_env: Option<String>,

    /// Override for the JSON API base URL.
    pub api_url: Option<String>,

    /// Override for the raster endpoint URL.
    pub raster_url: Option<String>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,
}

// ── Config file paths ───────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "inkfly", "inkfly").map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Resolve the discovery cache file path.
pub fn cache_path() -> PathBuf {
    ProjectDirs::from("com", "inkfly", "inkfly").map_or_else(
        || dirs_fallback(".cache").join("discovery.json"),
        |dirs| dirs.cache_dir().join("discovery.json"),
    )
}

fn dirs_fallback(kind: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(kind);
    p.push("inkfly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = base_figment(&config_path()).merge(Env::prefixed("INKFLY_").split("_"));
    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Load config from an explicit file only, skipping the environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = base_figment(path).extract()?;
    Ok(config)
}

fn base_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the signing secret from the credential chain (no CLI flag step).
pub fn resolve_secret_key(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's secret_key_env → env var lookup
    if let Some(ref env_name) = profile.secret_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("inkfly", &format!("{profile_name}/secret-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.secret_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve a full credential pair from a profile (no CLI flag step).
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    let api_key = profile
        .api_key
        .clone()
        .or_else(|| std::env::var("INKFLY_API_KEY").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    let secret = resolve_secret_key(profile, profile_name)?;

    Credentials::new(api_key, secret.expose_secret()).map_err(|err| ConfigError::Validation {
        field: "credentials".into(),
        reason: err.to_string(),
    })
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `StudioConfig` from an optional profile plus global defaults.
///
/// Flag overrides are the CLI's business; this only layers profile
/// values over the built-in service endpoints.
pub fn profile_to_studio_config(profile: Option<&Profile>, defaults: &Defaults) -> StudioConfig {
    StudioConfig {
        api_url: profile
            .and_then(|p| p.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
        raster_url: profile
            .and_then(|p| p.raster_url.clone())
            .unwrap_or_else(|| DEFAULT_RASTER_URL.to_owned()),
        timeout_secs: profile.and_then(|p| p.timeout).unwrap_or(defaults.timeout),
        cache_ttl_hours: defaults.cache_ttl_hours,
        cache_path: Some(cache_path()),
    }
}
