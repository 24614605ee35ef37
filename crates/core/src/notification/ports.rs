//! Port interfaces for notification delivery

use async_trait::async_trait;
use slated_domain::{NotificationReceipt, NotificationRequest, Result};

/// Trait for the transport seam behind the notification gate.
///
/// The simulated adapter always succeeds once a request is authorized.
/// Real email/SMS/push/slack senders plug in here instead; they may fail
/// with `SlatedError::Dispatch` and own their retry/backoff policy.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Deliver a notification over its channel.
    async fn deliver(&self, request: &NotificationRequest) -> Result<NotificationReceipt>;
}
