//! Audit trail port
//!
//! Recording is fire-and-forget from the pipeline's point of view: the
//! orchestrator calls the sink synchronously for every stage transition,
//! but a sink failure never aborts a request. Adapters handle their own
//! errors internally, which is why `record` is infallible here.

use async_trait::async_trait;
use slated_domain::AuditEntry;

/// Trait for recording pipeline transitions.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record one audit entry.
    async fn record(&self, entry: AuditEntry);
}
