//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.healthfirst/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HealthFirstConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AccountConfig {
    /// Pre-fills the login form.
    pub email: Option<String>,
    /// Send the signed-in email with "create session". Some backend
    /// deployments expect it; the session cookie is enough for the rest.
    pub attach_email_to_sessions: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "healthfirst.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_ROUTE: &str = "/";

pub const ENV_API_URL: &str = "HEALTHFIRST_API_URL";
pub const ENV_EMAIL: &str = "HEALTHFIRST_EMAIL";
pub const ENV_LOG_LEVEL: &str = "HEALTHFIRST_LOG_LEVEL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// `None` disables the per-request timeout.
    pub request_timeout: Option<Duration>,
    pub email: Option<String>,
    pub attach_email_to_sessions: bool,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub initial_route: String,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub email: Option<String>,
    pub route: Option<String>,
    pub log_file: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.healthfirst/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".healthfirst").join("config.toml"))
}

/// Load config from `~/.healthfirst/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HealthFirstConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HealthFirstConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HealthFirstConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<HealthFirstConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(HealthFirstConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HealthFirstConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# HealthFirst Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:5000/api"   # Or set HEALTHFIRST_API_URL
# request_timeout_secs = 120               # Unset or 0 means no client timeout

# [account]
# email = "me@example.com"                 # Pre-fills the login form (HEALTHFIRST_EMAIL)
# attach_email_to_sessions = false         # Send email when creating a chat session

# [general]
# log_level = "debug"                      # off, error, warn, info, debug, trace
# log_file = "healthfirst.log"
"#;

fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HealthFirstConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with the environment supplied by the caller.
pub fn resolve_with_env(
    config: &HealthFirstConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env(ENV_API_URL))
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // No client timeout unless configured; bot replies can be slow
    let request_timeout = match config.server.request_timeout_secs {
        None | Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
    };

    let email = cli
        .email
        .clone()
        .or_else(|| env(ENV_EMAIL))
        .or_else(|| config.account.email.clone())
        .filter(|e| !e.trim().is_empty());

    let log_level = env(ENV_LOG_LEVEL)
        .or_else(|| config.general.log_level.clone())
        .map(|raw| parse_level(&raw))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        base_url,
        request_timeout,
        email,
        attach_email_to_sessions: config.account.attach_email_to_sessions.unwrap_or(false),
        log_level,
        log_file: PathBuf::from(log_file),
        initial_route: cli
            .route
            .clone()
            .unwrap_or_else(|| DEFAULT_ROUTE.to_string()),
    }
}

fn parse_level(raw: &str) -> LevelFilter {
    LevelFilter::from_str(raw.trim()).unwrap_or_else(|_| {
        warn!("Unknown log level {:?}, using {}", raw, DEFAULT_LOG_LEVEL);
        DEFAULT_LOG_LEVEL
    })
}
