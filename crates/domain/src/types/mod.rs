//! Domain types and models

pub mod auth;
pub mod notification;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use auth::Claims;
pub use notification::{
    NotificationChannel, NotificationReceipt, NotificationRequest, NotificationStatus, Recipient,
};

use crate::errors::{Result, SlatedError};

/// Lifecycle of a scheduled event.
///
/// Transitions are linear (`Scheduled` → `InProgress` → `Completed`);
/// `Cancelled` is reachable from any non-terminal state and nothing
/// moves backward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl EventStatus {
    /// Whether the status lattice allows moving to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Cancelled => true,
            Self::InProgress => self == Self::Scheduled,
            Self::Completed => self == Self::InProgress,
            Self::Scheduled => false,
        }
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// A calendar event accepted into the schedule.
///
/// Immutable once committed except for status transitions. `end_time` is
/// always `start_time` plus the extracted duration, so `start < end` holds
/// by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub event_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    pub user_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
    pub status: EventStatus,
    pub reminder_minutes: u32,
    pub created_at: DateTime<Utc>,
}

impl ScheduleEvent {
    /// Create a new event in the `Scheduled` state with a generated id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        user_id: impl Into<String>,
        reminder_minutes: u32,
    ) -> Self {
        Self {
            event_id: format!("evt_{}", Uuid::now_v7()),
            title: title.into(),
            description: description.into(),
            start_time,
            end_time,
            location: String::new(),
            user_id: user_id.into(),
            participants: Vec::new(),
            status: EventStatus::Scheduled,
            reminder_minutes,
            created_at: Utc::now(),
        }
    }

    /// Advance the event status along the allowed lattice.
    ///
    /// # Errors
    /// Returns `SlatedError::Validation` if the transition is backward or
    /// out of a terminal state.
    pub fn transition(&mut self, next: EventStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(SlatedError::Validation(format!(
                "invalid status transition: {:?} -> {next:?}",
                self.status
            )));
        }
        self.status = next;
        Ok(())
    }
}

/// One audit record emitted per pipeline transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub input_summary: String,
    pub result_summary: String,
}

impl AuditEntry {
    /// Create an entry timestamped at "now".
    pub fn new(
        action: impl Into<String>,
        input_summary: impl Into<String>,
        result_summary: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            input_summary: input_summary.into(),
            result_summary: result_summary.into(),
        }
    }
}

/// Final result shape returned to the inbound caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<ScheduleEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl PipelineOutcome {
    /// Successful outcome carrying the accepted event and, when a reminder
    /// was requested, the delivery receipt.
    pub fn completed(event: ScheduleEvent, notification: Option<NotificationReceipt>) -> Self {
        Self {
            success: true,
            event: Some(event),
            notification,
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Failed outcome carrying a human-readable error string.
    pub fn failed(error: &SlatedError) -> Self {
        Self {
            success: false,
            event: None,
            notification: None,
            error: Some(error.to_string()),
            timestamp: Utc::now(),
        }
    }
}
