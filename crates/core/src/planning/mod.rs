//! Event planning: extraction plus the conflict rule

pub mod ports;
pub mod service;

pub use service::{PlannedEvent, PlanningService};
