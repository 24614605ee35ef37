//! Natural-language schedule request parser.
//!
//! Turns free text into a structured event draft. This is a best-effort,
//! pattern-based heuristic, not an NLP system: an ordered list of extraction
//! rules runs over the same input, each rule overriding exactly one field of
//! the baseline draft, first regex match wins per rule. Malformed input never
//! fails; unmatched fields keep their defaults.
//!
//! Rule order:
//! 1. Baseline: start = now + 1h, duration 60 min, reminder 30 min,
//!    title "Meeting".
//! 2. The literal marker "tomorrow" shifts the start by one day. No other
//!    day name shifts the date; "Monday" or "next Friday" fall through to
//!    the baseline (accepted precision gap).
//! 3. A 12-hour clock time overrides the hour/minute of the start.
//! 4. A duration phrase overrides the event length.
//! 5. An imperative-verb phrase overrides the title.
//! 6. end = start + duration.
//! 7. A reminder phrase overrides the reminder offset.

use chrono::{DateTime, Duration, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    DEFAULT_DURATION_MINUTES, DEFAULT_EVENT_TITLE, DEFAULT_REMINDER_MINUTES,
    DEFAULT_START_OFFSET_HOURS,
};

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2}):?(\d{2})?\s*(am|pm)")
        .expect("CLOCK_TIME should compile - this is a bug")
});

static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*(minute|hour|hr)").expect("DURATION should compile - this is a bug")
});

// The verb phrase captures lazily up to the next temporal keyword. The
// keyword is consumed rather than asserted because the regex crate has no
// lookahead; the captured title is identical either way.
static TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:schedule|plan|set up|create)\s+(?:a|an)?\s*(.*?)\s+(?:at|on|for|tomorrow|today|\d)")
        .expect("TITLE should compile - this is a bug")
});

static REMINDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:remind|notify|alert).*?(\d+)\s*(minute|hour|hr)")
        .expect("REMINDER should compile - this is a bug")
});

/// Structured event draft extracted from a request text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScheduleRequest {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: u32,
    pub reminder_minutes: u32,
    pub description: String,
}

/// Parse a scheduling request relative to a reference instant.
///
/// Deterministic and idempotent for a fixed `now`: the same text always
/// yields the same draft. Never fails; inputs with no recognizable pattern
/// produce the fixed defaults.
pub fn parse_schedule_request(text: &str, now: DateTime<Utc>) -> ParsedScheduleRequest {
    let mut start_time = now + Duration::hours(DEFAULT_START_OFFSET_HOURS);
    let mut duration_minutes = DEFAULT_DURATION_MINUTES;
    let mut reminder_minutes = DEFAULT_REMINDER_MINUTES;
    let mut title = DEFAULT_EVENT_TITLE.to_string();

    if text.to_lowercase().contains("tomorrow") {
        start_time += Duration::days(1);
    }

    if let Some(clock) = extract_clock_time(text) {
        start_time = apply_clock_time(start_time, clock);
    }

    if let Some(minutes) = extract_span_minutes(&DURATION, text) {
        duration_minutes = minutes;
    }

    if let Some(extracted) = extract_title(text) {
        title = extracted;
    }

    let end_time = start_time + Duration::minutes(i64::from(duration_minutes));

    if let Some(minutes) = extract_span_minutes(&REMINDER, text) {
        reminder_minutes = minutes;
    }

    ParsedScheduleRequest {
        title,
        start_time,
        end_time,
        duration_minutes,
        reminder_minutes,
        description: format!("Scheduled from user request: {text}"),
    }
}

/// First 12-hour clock match as a 24-hour (hour, minute) pair.
///
/// "pm" with hour < 12 adds 12. There is no special-casing of 12 am/12 pm:
/// "12 am" stays hour 12.
fn extract_clock_time(text: &str) -> Option<(u32, u32)> {
    let caps = CLOCK_TIME.captures(text)?;
    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
    if caps.get(3)?.as_str().eq_ignore_ascii_case("pm") && hour < 12 {
        hour += 12;
    }
    Some((hour, minute))
}

/// Override the clock fields of `start`, zeroing seconds and sub-seconds.
/// An out-of-range hour or minute leaves the baseline untouched.
fn apply_clock_time(start: DateTime<Utc>, (hour, minute): (u32, u32)) -> DateTime<Utc> {
    start
        .with_hour(hour)
        .and_then(|t| t.with_minute(minute))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(start)
}

/// First `<integer> (minute|hour|hr)` span in minutes; hour units multiply
/// by 60. Unparseable integers are ignored rather than failing.
fn extract_span_minutes(pattern: &Regex, text: &str) -> Option<u32> {
    let caps = pattern.captures(text)?;
    let value: u32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str();
    if unit.eq_ignore_ascii_case("minute") {
        Some(value)
    } else {
        value.checked_mul(60)
    }
}

fn extract_title(text: &str) -> Option<String> {
    let caps = TITLE.captures(text)?;
    let title = caps.get(1)?.as_str().trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
