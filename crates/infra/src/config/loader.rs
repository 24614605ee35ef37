//! Configuration loader
//!
//! Builds the application configuration in three layers: built-in
//! defaults, an optional config file, then environment variables. Later
//! layers override earlier ones, so a deployment can ship a file and
//! still tweak single values through the environment.
//!
//! ## Environment Variables
//! - `SLATED_TENANT_ID`: Tenant id embedded in the credential issuer URI
//! - `SLATED_SIGNING_SECRET`: Credential signing secret
//! - `SLATED_TOKEN_TTL_SECS`: Credential lifetime in seconds
//! - `SLATED_DISPATCH_DELAY_MS`: Simulated dispatch delay
//! - `SLATED_DEFAULT_CHANNEL`: Reminder channel (email|sms|push|slack)
//! - `SLATED_AUDIT_LOG_PATH`: Append-only audit file
//! - `SLATED_AUDIT_MEMORY_ENTRIES`: Bound on the in-memory audit tail
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./slated.toml` or `./slated.json`
//! 2. `./config.toml` or `./config.json`
//! 3. The same names in the parent directory
//!
//! TOML and JSON are supported, detected by file extension.

use std::path::{Path, PathBuf};

use slated_domain::{Config, NotificationChannel, Result, SlatedError};

/// Load configuration from defaults, an optional file, and the environment.
///
/// # Errors
/// Returns `SlatedError::Config` if a found file cannot be parsed or an
/// environment variable holds an invalid value.
pub fn load() -> Result<Config> {
    let mut config = match probe_config_paths().into_iter().find(|p| p.is_file()) {
        Some(path) => {
            tracing::info!(path = %path.display(), "configuration loaded from file");
            load_from_file(&path)?
        }
        None => {
            tracing::debug!("no config file found, starting from defaults");
            Config::default()
        }
    };
    apply_env_overrides(&mut config, &|key| std::env::var(key).ok())?;
    Ok(config)
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns `SlatedError::Config` if the file cannot be read, the format
/// is unsupported, or the contents do not parse.
pub fn load_from_file(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| SlatedError::Config(format!("failed to read {}: {e}", path.display())))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&raw)
            .map_err(|e| SlatedError::Config(format!("invalid TOML config: {e}"))),
        Some("json") => serde_json::from_str(&raw)
            .map_err(|e| SlatedError::Config(format!("invalid JSON config: {e}"))),
        _ => Err(SlatedError::Config(format!("unsupported config format: {}", path.display()))),
    }
}

fn probe_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for dir in [".", ".."] {
        for name in ["slated.toml", "slated.json", "config.toml", "config.json"] {
            paths.push(Path::new(dir).join(name));
        }
    }
    paths
}

/// Overlay environment variables onto a configuration.
///
/// The lookup is injected so tests can run without touching process-wide
/// environment state.
fn apply_env_overrides(
    config: &mut Config,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(tenant_id) = lookup("SLATED_TENANT_ID") {
        config.auth.tenant_id = tenant_id;
    }
    if let Some(secret) = lookup("SLATED_SIGNING_SECRET") {
        config.auth.signing_secret = Some(secret);
    }
    if let Some(ttl) = lookup("SLATED_TOKEN_TTL_SECS") {
        config.auth.token_ttl_secs = parse_number("SLATED_TOKEN_TTL_SECS", &ttl)?;
    }
    if let Some(delay) = lookup("SLATED_DISPATCH_DELAY_MS") {
        config.notify.dispatch_delay_ms = parse_number("SLATED_DISPATCH_DELAY_MS", &delay)?;
    }
    if let Some(channel) = lookup("SLATED_DEFAULT_CHANNEL") {
        config.notify.default_channel = parse_channel(&channel)?;
    }
    if let Some(path) = lookup("SLATED_AUDIT_LOG_PATH") {
        config.audit.log_path = Some(PathBuf::from(path));
    }
    if let Some(max) = lookup("SLATED_AUDIT_MEMORY_ENTRIES") {
        config.audit.max_memory_entries = parse_number("SLATED_AUDIT_MEMORY_ENTRIES", &max)?;
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| SlatedError::Config(format!("invalid {key}: {e}")))
}

fn parse_channel(value: &str) -> Result<NotificationChannel> {
    match value.to_ascii_lowercase().as_str() {
        "email" => Ok(NotificationChannel::Email),
        "sms" => Ok(NotificationChannel::Sms),
        "push" => Ok(NotificationChannel::Push),
        "slack" => Ok(NotificationChannel::Slack),
        other => Err(SlatedError::Config(format!("unknown notification channel: {other}"))),
    }
}
