//! Shared defaults for extraction, credentials, and dispatch.

/// Title used when no title can be extracted from the request text.
pub const DEFAULT_EVENT_TITLE: &str = "Meeting";

/// Event length assumed when the request names no duration.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Reminder offset assumed when the request names none.
pub const DEFAULT_REMINDER_MINUTES: u32 = 30;

/// How far ahead of "now" an event starts when no clock time is given.
pub const DEFAULT_START_OFFSET_HOURS: i64 = 1;

/// Lifetime of a stage-to-stage credential, in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 300;

/// Artificial delay of the simulated dispatch seam.
pub const DEFAULT_DISPATCH_DELAY_MS: u64 = 500;

/// Bound on the audit sink's in-memory tail.
pub const DEFAULT_AUDIT_MEMORY_ENTRIES: usize = 1000;

/// Audience identifier of the notification stage.
pub const NOTIFIER_STAGE_ID: &str = "notifier";
