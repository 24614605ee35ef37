//! In-memory accepted-events store
//!
//! Process-lifetime, append-only set of accepted events with a
//! single-writer commit discipline. All mutation happens inside one mutex
//! acquisition, which makes the exact-start conflict check linearizable:
//! two concurrent requests for the same instant cannot both pass the
//! check and double-book.
//!
//! Persistence is a collaborator concern; this adapter deliberately keeps
//! no state across restarts.

use async_trait::async_trait;
use slated_core::planning::ports::{CommitOutcome, EventStore};
use slated_domain::{Result, ScheduleEvent};
use tokio::sync::Mutex;
use tracing::debug;

/// Mutex-guarded, vec-backed event store.
#[derive(Default)]
pub struct InMemoryEventStore {
    events: Mutex<Vec<ScheduleEvent>>,
}

impl InMemoryEventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn commit(&self, event: ScheduleEvent) -> Result<CommitOutcome> {
        let mut events = self.events.lock().await;
        if let Some(existing) = events.iter().find(|e| e.start_time == event.start_time) {
            debug!(
                candidate = %event.event_id,
                existing = %existing.event_id,
                start_time = %event.start_time,
                "commit rejected: exact start-instant collision"
            );
            return Ok(CommitOutcome::Conflicting {
                existing_title: existing.title.clone(),
                start_time: existing.start_time,
            });
        }
        events.push(event);
        Ok(CommitOutcome::Committed)
    }

    async fn events_for_user(&self, user_id: &str) -> Result<Vec<ScheduleEvent>> {
        let events = self.events.lock().await;
        Ok(events.iter().filter(|e| e.user_id == user_id).cloned().collect())
    }

    async fn count(&self) -> usize {
        self.events.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn event_at(minute: u32, user: &str) -> ScheduleEvent {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 14, minute, 0).unwrap();
        ScheduleEvent::new("Sync", "", start, start + Duration::minutes(30), user, 30)
    }

    #[tokio::test]
    async fn exact_same_start_conflicts() {
        let store = InMemoryEventStore::new();
        assert!(matches!(store.commit(event_at(0, "a")).await.unwrap(), CommitOutcome::Committed));

        let outcome = store.commit(event_at(0, "b")).await.unwrap();
        match outcome {
            CommitOutcome::Conflicting { existing_title, .. } => {
                assert_eq!(existing_title, "Sync");
            }
            CommitOutcome::Committed => panic!("expected a conflict"),
        }
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn differing_starts_both_commit() {
        let store = InMemoryEventStore::new();
        assert!(matches!(store.commit(event_at(0, "a")).await.unwrap(), CommitOutcome::Committed));
        assert!(matches!(store.commit(event_at(1, "a")).await.unwrap(), CommitOutcome::Committed));
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn concurrent_commits_for_one_instant_admit_exactly_one() {
        let store = std::sync::Arc::new(InMemoryEventStore::new());

        let (left, right) = tokio::join!(
            store.commit(event_at(0, "a")),
            store.commit(event_at(0, "b")),
        );

        let committed = [left.unwrap(), right.unwrap()]
            .iter()
            .filter(|o| matches!(o, CommitOutcome::Committed))
            .count();
        assert_eq!(committed, 1);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn events_for_user_filters_by_caller() {
        let store = InMemoryEventStore::new();
        store.commit(event_at(0, "a")).await.unwrap();
        store.commit(event_at(1, "b")).await.unwrap();
        store.commit(event_at(2, "a")).await.unwrap();

        let for_a = store.events_for_user("a").await.unwrap();
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|e| e.user_id == "a"));
    }
}
