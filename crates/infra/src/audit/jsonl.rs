//! JSONL audit sink
//!
//! Append-only JSON-lines file plus a bounded in-memory tail for
//! read-back. Recording runs synchronously with the pipeline but is
//! failure-tolerant: a write error is logged and dropped, never surfaced
//! to the request that triggered it.

use std::collections::VecDeque;
use std::path::PathBuf;

use async_trait::async_trait;
use slated_core::AuditSink;
use slated_domain::{AuditConfig, AuditEntry};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::error;

/// File-backed audit sink with an in-memory tail.
pub struct JsonlAuditSink {
    log_path: Option<PathBuf>,
    entries: RwLock<VecDeque<AuditEntry>>,
    max_memory_entries: usize,
}

impl JsonlAuditSink {
    /// Create a sink from the audit configuration.
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            log_path: config.log_path.clone(),
            entries: RwLock::new(VecDeque::with_capacity(config.max_memory_entries.min(1024))),
            max_memory_entries: config.max_memory_entries.max(1),
        }
    }

    /// Most recent entries, oldest first, capped at `limit`.
    pub async fn tail(&self, limit: usize) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    async fn append_line(&self, line: &str) -> std::io::Result<()> {
        let Some(path) = &self.log_path else {
            return Ok(());
        };
        let mut file = OpenOptions::new().append(true).create(true).open(path).await?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        Ok(())
    }
}

#[async_trait]
impl AuditSink for JsonlAuditSink {
    async fn record(&self, entry: AuditEntry) {
        match serde_json::to_string(&entry) {
            Ok(line) => {
                if let Err(err) = self.append_line(&line).await {
                    error!(error = %err, action = %entry.action, "audit file write failed; entry kept in memory only");
                }
            }
            Err(err) => {
                error!(error = %err, action = %entry.action, "audit entry serialization failed");
            }
        }

        let mut entries = self.entries.write().await;
        if entries.len() >= self.max_memory_entries {
            entries.pop_front();
        }
        entries.push_back(entry);
    }
}
