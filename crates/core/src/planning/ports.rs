//! Port interfaces for event planning
//!
//! These traits define the boundary between planning business logic
//! and the accepted-events store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slated_domain::{Result, ScheduleEvent};

/// Outcome of an atomic commit attempt against the accepted-events set.
#[derive(Debug, Clone)]
pub enum CommitOutcome {
    /// The event was admitted into the set.
    Committed,
    /// Another accepted event already starts at the exact same instant.
    Conflicting {
        existing_title: String,
        start_time: DateTime<Utc>,
    },
}

/// Trait for the accepted-events store.
///
/// `commit` must check and insert under a single critical section so the
/// exact-start conflict rule stays linearizable when requests run
/// concurrently against the same store.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Admit an event unless one already starts at the exact same instant.
    async fn commit(&self, event: ScheduleEvent) -> Result<CommitOutcome>;

    /// Events committed by a given user.
    async fn events_for_user(&self, user_id: &str) -> Result<Vec<ScheduleEvent>>;

    /// Number of committed events.
    async fn count(&self) -> usize;
}
