//! Simulated notification dispatch
//!
//! Stand-in for real email/SMS/push/slack senders. The artificial delay
//! models the network round-trip a production transport would make and is
//! the pipeline's only suspension point; other requests keep making
//! progress while a dispatch sleeps. Once a request reaches this seam it
//! always succeeds; real transports may fail with a dispatch error and
//! own their retry policy.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use slated_core::NotificationTransport;
use slated_domain::{NotificationReceipt, NotificationRequest, NotificationStatus, Result};
use tracing::info;
use uuid::Uuid;

/// Transport that sleeps instead of sending.
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    /// Create a transport with the given artificial delay.
    pub fn new(delay_ms: u64) -> Self {
        Self { delay: Duration::from_millis(delay_ms) }
    }
}

#[async_trait]
impl NotificationTransport for SimulatedTransport {
    async fn deliver(&self, request: &NotificationRequest) -> Result<NotificationReceipt> {
        tokio::time::sleep(self.delay).await;

        let receipt = NotificationReceipt {
            notification_id: format!("notif_{}", Uuid::now_v7()),
            status: NotificationStatus::Sent,
            sent_at: Utc::now(),
            recipients: request.recipients.iter().map(|r| r.id.clone()).collect(),
        };

        info!(
            notification_id = %receipt.notification_id,
            channel = request.channel.as_str(),
            recipient_count = request.recipients.len(),
            title = %request.title,
            "simulated dispatch complete"
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slated_domain::{NotificationChannel, Recipient};

    fn request() -> NotificationRequest {
        NotificationRequest {
            event_id: "evt_1".into(),
            user_id: "user_1".into(),
            title: "Reminder: Sync".into(),
            message: "Don't forget".into(),
            send_at: Utc::now(),
            channel: NotificationChannel::Push,
            recipients: vec![Recipient::new("user_1", "user"), Recipient::new("user_2", "user")],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dispatch_always_succeeds_once_reached() {
        let transport = SimulatedTransport::new(500);

        let receipt = transport.deliver(&request()).await.unwrap();
        assert!(receipt.notification_id.starts_with("notif_"));
        assert_eq!(receipt.status, NotificationStatus::Sent);
        assert_eq!(receipt.recipients, vec!["user_1".to_string(), "user_2".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn receipts_carry_distinct_ids() {
        let transport = SimulatedTransport::new(10);
        let first = transport.deliver(&request()).await.unwrap();
        let second = transport.deliver(&request()).await.unwrap();
        assert_ne!(first.notification_id, second.notification_id);
    }
}
