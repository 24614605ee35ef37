//! Application configuration model.
//!
//! Loading lives in the infra layer; the shapes live here so every crate
//! can consume them without an infra dependency.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AUDIT_MEMORY_ENTRIES, DEFAULT_DISPATCH_DELAY_MS, DEFAULT_TOKEN_TTL_SECS,
};
use crate::types::NotificationChannel;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth: AuthConfig,
    pub notify: NotifyConfig,
    pub audit: AuditConfig,
}

/// Credential issuance and verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Tenant identifier embedded in the issuer URI.
    pub tenant_id: String,
    /// Signing secret. When absent a fixed demo secret is used and the
    /// fallback is flagged loudly at startup.
    pub signing_secret: Option<String>,
    /// Credential lifetime in seconds.
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            tenant_id: "demo-tenant".to_string(),
            signing_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

/// Notification dispatch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Artificial delay of the simulated dispatch seam, in milliseconds.
    pub dispatch_delay_ms: u64,
    /// Channel used for reminders synthesized by the orchestrator.
    pub default_channel: NotificationChannel,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            dispatch_delay_ms: DEFAULT_DISPATCH_DELAY_MS,
            default_channel: NotificationChannel::Email,
        }
    }
}

/// Audit sink settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Append-only JSONL file. `None` keeps the audit trail in memory only.
    pub log_path: Option<PathBuf>,
    /// Bound on the in-memory tail kept for read-back.
    pub max_memory_entries: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { log_path: None, max_memory_entries: DEFAULT_AUDIT_MEMORY_ENTRIES }
    }
}
