//! # Slated Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The planning service (extraction plus the conflict rule)
//! - The notification gate (credential and scope enforcement)
//! - The orchestrator (plan → notify stage machine)
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `slated-domain`
//! - No filesystem, network, or crypto code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod notification;
pub mod orchestrator;
pub mod planning;

// Infrastructure ports
pub mod audit_ports;
pub mod token_ports;

// Re-export specific items to avoid ambiguity
pub use audit_ports::AuditSink;
pub use notification::ports::NotificationTransport;
pub use notification::NotificationService;
pub use orchestrator::{Orchestrator, PipelineStage};
pub use planning::ports::{CommitOutcome, EventStore};
pub use planning::{PlannedEvent, PlanningService};
pub use token_ports::{TokenIssuer, TokenVerifier};
