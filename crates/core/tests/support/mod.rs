//! Shared test helpers for `slated-core` integration tests.
//!
//! Lightweight in-memory mocks of the core ports so pipeline tests can
//! focus on behaviour instead of boilerplate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use slated_core::planning::ports::{CommitOutcome, EventStore};
use slated_core::{
    AuditSink, NotificationService, NotificationTransport, Orchestrator, PlanningService,
    TokenIssuer, TokenVerifier,
};
use slated_domain::{
    AuditEntry, Claims, NotificationReceipt, NotificationRequest, NotificationStatus, Result,
    ScheduleEvent, SlatedError,
};

/// Fixed reference instant used across pipeline tests.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
}

/// Vec-backed event store mirroring the production commit semantics.
#[derive(Default)]
pub struct VecEventStore {
    events: Mutex<Vec<ScheduleEvent>>,
}

#[async_trait]
impl EventStore for VecEventStore {
    async fn commit(&self, event: ScheduleEvent) -> Result<CommitOutcome> {
        let mut events = self.events.lock().unwrap();
        if let Some(existing) = events.iter().find(|e| e.start_time == event.start_time) {
            return Ok(CommitOutcome::Conflicting {
                existing_title: existing.title.clone(),
                start_time: existing.start_time,
            });
        }
        events.push(event);
        Ok(CommitOutcome::Committed)
    }

    async fn events_for_user(&self, user_id: &str) -> Result<Vec<ScheduleEvent>> {
        let events = self.events.lock().unwrap();
        Ok(events.iter().filter(|e| e.user_id == user_id).cloned().collect())
    }

    async fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

/// Issuer handing out a fixed opaque token.
pub struct StaticIssuer;

#[async_trait]
impl TokenIssuer for StaticIssuer {
    async fn issue(&self, _subject: &str, _audience: &str, _scopes: &[String]) -> Result<String> {
        Ok("stub-token".to_string())
    }
}

/// Verifier returning a configurable claim set or failure.
pub struct StaticVerifier {
    result: Result<Claims>,
}

impl StaticVerifier {
    /// Verifier whose claims grant exactly the given scopes.
    pub fn granting(scopes: &[&str]) -> Self {
        let now = reference_now().timestamp();
        Self {
            result: Ok(Claims {
                iss: "https://tokens.slated.local/test-tenant".into(),
                sub: "user_1".into(),
                aud: "notifier".into(),
                scopes: scopes.iter().map(ToString::to_string).collect(),
                iat: now,
                exp: now + 300,
            }),
        }
    }

    /// Verifier that rejects every credential.
    pub fn failing_auth() -> Self {
        Self { result: Err(SlatedError::Auth("invalid or expired credential".into())) }
    }
}

#[async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, _token: &str) -> Result<Claims> {
        self.result.clone()
    }
}

/// Transport that records every delivered request.
#[derive(Default)]
pub struct RecordingTransport {
    pub delivered: Mutex<Vec<NotificationRequest>>,
}

#[async_trait]
impl NotificationTransport for RecordingTransport {
    async fn deliver(&self, request: &NotificationRequest) -> Result<NotificationReceipt> {
        self.delivered.lock().unwrap().push(request.clone());
        Ok(NotificationReceipt {
            notification_id: "notif_test".to_string(),
            status: NotificationStatus::Sent,
            sent_at: Utc::now(),
            recipients: request.recipients.iter().map(|r| r.id.clone()).collect(),
        })
    }
}

/// Sink collecting audit entries in memory.
#[derive(Default)]
pub struct RecordingAudit {
    pub entries: Mutex<Vec<AuditEntry>>,
}

#[async_trait]
impl AuditSink for RecordingAudit {
    async fn record(&self, entry: AuditEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}

/// A fully wired pipeline over the mock ports.
pub struct TestPipeline {
    pub orchestrator: Orchestrator,
    pub store: Arc<VecEventStore>,
    pub transport: Arc<RecordingTransport>,
    pub audit: Arc<RecordingAudit>,
}

/// Wire an orchestrator around the given verifier and the recording mocks.
pub fn pipeline_with(verifier: StaticVerifier) -> TestPipeline {
    let store = Arc::new(VecEventStore::default());
    let transport = Arc::new(RecordingTransport::default());
    let audit = Arc::new(RecordingAudit::default());

    let planner = PlanningService::new(store.clone());
    let notifier = NotificationService::new(Arc::new(verifier), transport.clone());
    let orchestrator = Orchestrator::new(planner, notifier, Arc::new(StaticIssuer), audit.clone());

    TestPipeline { orchestrator, store, transport, audit }
}
