//! # Slated Domain
//!
//! Shared domain model for the scheduling pipeline:
//! - Event, notification, and credential types
//! - Error taxonomy and `Result` alias
//! - Configuration model and shared defaults
//! - Natural-language request parsing

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

pub use config::{AuditConfig, AuthConfig, Config, NotifyConfig};
pub use errors::{Result, SlatedError};
pub use types::{
    AuditEntry, Claims, EventStatus, NotificationChannel, NotificationReceipt,
    NotificationRequest, NotificationStatus, PipelineOutcome, Recipient, ScheduleEvent,
};
pub use utils::request_parser::{parse_schedule_request, ParsedScheduleRequest};
