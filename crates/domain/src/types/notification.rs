//! Notification drafts, channels, and delivery receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SlatedError};

/// Delivery channel for a notification.
///
/// Closed enumeration; each channel maps to exactly one send scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    Email,
    Sms,
    Push,
    Slack,
}

impl NotificationChannel {
    /// The single scope a credential must carry to send on this channel.
    pub fn required_scope(self) -> &'static str {
        match self {
            Self::Email => "notifications:email:send",
            Self::Sms => "notifications:sms:send",
            Self::Push => "notifications:push:send",
            Self::Slack => "notifications:slack:send",
        }
    }

    /// Wire name of the channel.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Push => "push",
            Self::Slack => "slack",
        }
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::Email
    }
}

/// Delivery state of a notification.
///
/// `Delivered` is reported by downstream transports only; the simulated
/// dispatch seam stops at `Sent`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
    Delivered,
}

/// A single notification recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
    pub kind: String,
}

impl Recipient {
    /// Convenience constructor.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { id: id.into(), kind: kind.into() }
    }
}

/// Draft of a notification, synthesized from an accepted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub event_id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub send_at: DateTime<Utc>,
    #[serde(default)]
    pub channel: NotificationChannel,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

impl NotificationRequest {
    /// Structural validation of required fields.
    ///
    /// # Errors
    /// Returns `SlatedError::Validation` naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("event_id", &self.event_id),
            ("user_id", &self.user_id),
            ("title", &self.title),
            ("message", &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SlatedError::Validation(format!("missing required field: {field}")));
            }
        }
        Ok(())
    }
}

/// Result of handing a draft to the transport seam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub notification_id: String,
    pub status: NotificationStatus,
    pub sent_at: DateTime<Utc>,
    pub recipients: Vec<String>,
}
