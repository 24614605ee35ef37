//! Orchestrator - sequences the two-stage pipeline
//!
//! Stage machine: `Plan → Notify → Done`, with either stage aborting to
//! `Failed`. The orchestrator invokes the planning service, synthesizes a
//! reminder draft from the accepted event, requests a scoped credential,
//! and hands both to the notification gate. Every stage transition emits
//! an audit record; audit failures never abort the pipeline.
//!
//! There is no compensating rollback: when the notify stage fails, the
//! event committed by the plan stage stays committed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use slated_domain::constants::NOTIFIER_STAGE_ID;
use slated_domain::{
    AuditEntry, NotificationChannel, NotificationReceipt, NotificationRequest, PipelineOutcome,
    Recipient, Result,
};
use tracing::{info, warn};

use crate::audit_ports::AuditSink;
use crate::notification::NotificationService;
use crate::planning::{PlannedEvent, PlanningService};
use crate::token_ports::TokenIssuer;

/// Stage of the two-step pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Plan,
    Notify,
    Done,
    Failed,
}

impl PipelineStage {
    /// Stable label for logs and audit summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Notify => "notify",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

/// Orchestrates the flow between the planning and notification stages.
pub struct Orchestrator {
    planner: PlanningService,
    notifier: NotificationService,
    issuer: Arc<dyn TokenIssuer>,
    audit: Arc<dyn AuditSink>,
    reminder_channel: NotificationChannel,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(
        planner: PlanningService,
        notifier: NotificationService,
        issuer: Arc<dyn TokenIssuer>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            planner,
            notifier,
            issuer,
            audit,
            reminder_channel: NotificationChannel::Email,
        }
    }

    /// Set the channel used for synthesized reminders (default email).
    pub fn with_reminder_channel(mut self, channel: NotificationChannel) -> Self {
        self.reminder_channel = channel;
        self
    }

    /// Process a scheduling request through the full pipeline.
    pub async fn handle(&self, user_request: &str, user_id: &str) -> PipelineOutcome {
        self.handle_at(user_request, user_id, Utc::now()).await
    }

    /// Process a scheduling request relative to an explicit instant.
    ///
    /// `now` anchors the extraction; injecting it keeps outcomes
    /// deterministic for callers that need reproducibility.
    pub async fn handle_at(
        &self,
        user_request: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> PipelineOutcome {
        info!(user_id, "pipeline started");

        let planned = match self.plan_stage(user_request, user_id, now).await {
            Ok(planned) => planned,
            Err(error) => {
                warn!(
                    user_id,
                    error = %error,
                    error_label = error.label(),
                    retryable = error.is_retryable(),
                    stage = PipelineStage::Plan.as_str(),
                    "pipeline failed"
                );
                return PipelineOutcome::failed(&error);
            }
        };

        match self.notify_stage(&planned).await {
            Ok(receipt) => {
                info!(
                    user_id,
                    event_id = %planned.event.event_id,
                    notified = receipt.is_some(),
                    "pipeline completed"
                );
                PipelineOutcome::completed(planned.event, receipt)
            }
            Err(error) => {
                // The planned event stays committed; planning success is
                // not undone by a downstream notification failure.
                warn!(
                    user_id,
                    error = %error,
                    error_label = error.label(),
                    retryable = error.is_retryable(),
                    stage = PipelineStage::Notify.as_str(),
                    "pipeline failed"
                );
                PipelineOutcome::failed(&error)
            }
        }
    }

    /// Plan transition: extract, conflict-check, and commit the event.
    async fn plan_stage(
        &self,
        user_request: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PlannedEvent> {
        let result = self.planner.plan(user_request, user_id, now).await;

        let result_summary = match &result {
            Ok(planned) => format!(
                "event={} start={} notify_at={}",
                planned.event.event_id, planned.event.start_time, planned.notify_at
            ),
            Err(error) => format!("error={error}"),
        };
        self.audit
            .record(AuditEntry::new(
                "planner.plan",
                format!("user={user_id} request=\"{}\"", summarize(user_request)),
                result_summary,
            ))
            .await;

        result
    }

    /// Notify transition: synthesize the reminder, obtain a scoped
    /// credential, and run the gate. Skipped entirely when the plan stage
    /// reported no reminder.
    async fn notify_stage(&self, planned: &PlannedEvent) -> Result<Option<NotificationReceipt>> {
        if !planned.notification_required {
            return Ok(None);
        }

        let request = self.build_reminder(planned);
        let result = self.authorize_and_send(&planned.event.user_id, &request).await;

        let result_summary = match &result {
            Ok(receipt) => {
                format!("notification={} status={:?}", receipt.notification_id, receipt.status)
            }
            Err(error) => format!("error={error}"),
        };
        self.audit
            .record(AuditEntry::new(
                "notifier.process",
                format!(
                    "event={} channel={} send_at={}",
                    request.event_id,
                    request.channel.as_str(),
                    request.send_at
                ),
                result_summary,
            ))
            .await;

        result.map(Some)
    }

    async fn authorize_and_send(
        &self,
        user_id: &str,
        request: &NotificationRequest,
    ) -> Result<NotificationReceipt> {
        let scopes = vec![request.channel.required_scope().to_string()];
        let token = self.issuer.issue(user_id, NOTIFIER_STAGE_ID, &scopes).await?;
        self.notifier.process(&token, request).await
    }

    fn build_reminder(&self, planned: &PlannedEvent) -> NotificationRequest {
        let event = &planned.event;
        NotificationRequest {
            event_id: event.event_id.clone(),
            user_id: event.user_id.clone(),
            title: format!("Reminder: {}", event.title),
            message: format!("Don't forget: {} at {}", event.title, event.start_time),
            send_at: planned.notify_at,
            channel: self.reminder_channel,
            recipients: vec![Recipient::new(event.user_id.clone(), "user")],
        }
    }
}

/// Bound the request text echoed into audit records.
fn summarize(text: &str) -> String {
    const MAX_CHARS: usize = 120;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{head}…")
    }
}
