//! Configuration loader
//!
//! ## Loading Strategy
//! 1. An explicit file, or the first file found by [`probe_config_paths`]
//! 2. Built-in defaults when no file is found
//! 3. Environment overrides on top of either
//!
//! JSON and TOML files are supported, detected by extension.
//!
//! ## Environment Variables
//! - `LBCTL_ACCOUNT_API_URL`: account/datacenter host base URL
//! - `LBCTL_LB_API_URL`: load-balancer host base URL
//! - `LBCTL_LOGIN_PATH`: login endpoint path
//! - `LBCTL_TIMEOUT_SECS`: request timeout in seconds
//! - `LBCTL_CLOSE_CONNECTIONS`: send `Connection: close` (true/false)
//! - `LBCTL_DEBUG_REQUESTS`: dump outgoing requests (true/false)
//! - `LBCTL_DEBUG_RESPONSES`: dump incoming responses (true/false)
//! - `LBCTL_DANGER_ACCEPT_INVALID_CERTS`: skip TLS verification (true/false)
//!
//! ## File Locations
//! 1. `./lbctl.toml` or `./lbctl.json` (current working directory)
//! 2. `config.toml` in the user's config directory (`~/.config/lbctl` on Linux)
//! 3. `lbctl.toml` or `lbctl.json` next to the executable

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use lbctl_domain::{Config, LbError, Result};

pub const ENV_ACCOUNT_API_URL: &str = "LBCTL_ACCOUNT_API_URL";
pub const ENV_LB_API_URL: &str = "LBCTL_LB_API_URL";
pub const ENV_LOGIN_PATH: &str = "LBCTL_LOGIN_PATH";
pub const ENV_TIMEOUT_SECS: &str = "LBCTL_TIMEOUT_SECS";
pub const ENV_CLOSE_CONNECTIONS: &str = "LBCTL_CLOSE_CONNECTIONS";
pub const ENV_DEBUG_REQUESTS: &str = "LBCTL_DEBUG_REQUESTS";
pub const ENV_DEBUG_RESPONSES: &str = "LBCTL_DEBUG_RESPONSES";
pub const ENV_DANGER_ACCEPT_INVALID_CERTS: &str = "LBCTL_DANGER_ACCEPT_INVALID_CERTS";

/// Load configuration: file (explicit or probed) or defaults, then
/// environment overrides
///
/// # Errors
/// Returns `LbError::Config` if:
/// - An explicit `path` does not exist
/// - The file cannot be read or parsed
/// - An environment override has an invalid value
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_from_file(Some(path))?,
        None => match probe_config_paths() {
            Some(found) => load_from_file(Some(found))?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Defaults with environment overrides applied, ignoring config files
///
/// # Errors
/// Returns `LbError::Config` if an override has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `LbError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(LbError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            LbError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LbError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LbError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LbError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(LbError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend([cwd.join("lbctl.toml"), cwd.join("lbctl.json")]);
    }

    if let Some(dirs) = ProjectDirs::from("", "", "lbctl") {
        candidates.push(dirs.config_dir().join("config.toml"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend([exe_dir.join("lbctl.toml"), exe_dir.join("lbctl.json")]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(url) = env_var(ENV_ACCOUNT_API_URL) {
        config.api.account_api_url = url;
    }
    if let Some(url) = env_var(ENV_LB_API_URL) {
        config.api.lb_api_url = url;
    }
    if let Some(path) = env_var(ENV_LOGIN_PATH) {
        config.api.login_path = path;
    }
    if let Some(timeout) = env_var(ENV_TIMEOUT_SECS) {
        config.http.timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| LbError::Config(format!("Invalid {ENV_TIMEOUT_SECS}: {e}")))?;
    }

    let http = &mut config.http;
    http.close_connections = env_bool(ENV_CLOSE_CONNECTIONS, http.close_connections);
    http.debug_requests = env_bool(ENV_DEBUG_REQUESTS, http.debug_requests);
    http.debug_responses = env_bool(ENV_DEBUG_RESPONSES, http.debug_responses);
    http.danger_accept_invalid_certs =
        env_bool(ENV_DANGER_ACCEPT_INVALID_CERTS, http.danger_accept_invalid_certs);

    Ok(())
}

/// Non-empty environment variable
pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Returns `default` if the variable is not set.
fn env_bool(key: &str, default: bool) -> bool {
    env_var(key)
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
