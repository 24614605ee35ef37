//! Planning service - core business logic
//!
//! Parses a scheduling request into an event draft, applies the conflict
//! rule, and commits the accepted event. Extraction itself never fails;
//! only input validation and the conflict check can reject a request.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use slated_domain::utils::request_parser::parse_schedule_request;
use slated_domain::{Result, ScheduleEvent, SlatedError};
use tracing::info;

use super::ports::{CommitOutcome, EventStore};

/// An accepted event plus the instant its reminder falls due.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedEvent {
    pub event: ScheduleEvent,
    /// Start minus the reminder offset.
    pub notify_at: DateTime<Utc>,
    /// False when the request asked for no reminder (offset of zero).
    pub notification_required: bool,
}

/// Planning service for turning request text into committed events
pub struct PlanningService {
    store: Arc<dyn EventStore>,
}

impl PlanningService {
    /// Create a new planning service
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Plan and commit an event from a scheduling request.
    ///
    /// `now` is the reference instant the extraction is relative to;
    /// callers pass the current time, tests pass a fixed one.
    ///
    /// # Errors
    /// - `SlatedError::Validation` when the request text or caller id is
    ///   empty.
    /// - `SlatedError::Conflict` when an accepted event already starts at
    ///   the exact same instant. The conflict check is global across
    ///   callers sharing the store.
    pub async fn plan(
        &self,
        user_request: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PlannedEvent> {
        if user_request.trim().is_empty() {
            return Err(SlatedError::Validation("user_request must not be empty".to_string()));
        }
        if user_id.trim().is_empty() {
            return Err(SlatedError::Validation("user_id must not be empty".to_string()));
        }

        let parsed = parse_schedule_request(user_request, now);
        let event = ScheduleEvent::new(
            parsed.title,
            parsed.description,
            parsed.start_time,
            parsed.end_time,
            user_id,
            parsed.reminder_minutes,
        );

        match self.store.commit(event.clone()).await? {
            CommitOutcome::Committed => {}
            CommitOutcome::Conflicting { existing_title, start_time } => {
                return Err(SlatedError::Conflict(format!(
                    "an event is already scheduled at this time: {existing_title} at {start_time}"
                )));
            }
        }

        info!(
            event_id = %event.event_id,
            user_id,
            start_time = %event.start_time,
            "event committed"
        );

        let notify_at = event.start_time - Duration::minutes(i64::from(event.reminder_minutes));
        let notification_required = event.reminder_minutes > 0;
        Ok(PlannedEvent { event, notify_at, notification_required })
    }
}
