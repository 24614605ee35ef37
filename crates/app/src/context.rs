//! Application context: adapter wiring
//!
//! Builds the adapter graph once at startup and hands the orchestrator
//! to callers. Every service holds its dependencies behind `Arc<dyn ..>`
//! so the wiring here is the only place concrete types appear.

use std::sync::Arc;

use slated_core::{EventStore, NotificationService, Orchestrator, PlanningService};
use slated_domain::{AuditEntry, Config, PipelineOutcome, Result, ScheduleEvent};
use slated_infra::{InMemoryEventStore, JsonlAuditSink, SignedTokenCodec, SimulatedTransport};

/// Wired application context.
pub struct AppContext {
    orchestrator: Orchestrator,
    store: Arc<InMemoryEventStore>,
    audit: Arc<JsonlAuditSink>,
    config: Config,
}

impl AppContext {
    /// Wire the concrete adapters into the core services.
    #[must_use]
    pub fn init(config: Config) -> Self {
        let store = Arc::new(InMemoryEventStore::new());
        let codec = Arc::new(SignedTokenCodec::new(&config.auth));
        let transport = Arc::new(SimulatedTransport::new(config.notify.dispatch_delay_ms));
        let audit = Arc::new(JsonlAuditSink::new(&config.audit));

        let planner = PlanningService::new(store.clone());
        let notifier = NotificationService::new(codec.clone(), transport);
        let orchestrator = Orchestrator::new(planner, notifier, codec, audit.clone())
            .with_reminder_channel(config.notify.default_channel);

        Self {
            orchestrator,
            store,
            audit,
            config,
        }
    }

    /// Run one scheduling request through the pipeline.
    pub async fn handle(&self, user_request: &str, caller_id: &str) -> PipelineOutcome {
        self.orchestrator.handle(user_request, caller_id).await
    }

    /// Events committed by a given caller.
    pub async fn events_for(&self, user_id: &str) -> Result<Vec<ScheduleEvent>> {
        self.store.events_for_user(user_id).await
    }

    /// Most recent audit entries, oldest first.
    pub async fn audit_tail(&self, limit: usize) -> Vec<AuditEntry> {
        self.audit.tail(limit).await
    }

    /// The configuration this context was built from.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
