//! Formatting helpers for console narration

use chrono::{DateTime, SecondsFormat, Utc};

/// Insert `+<millis>` before the first `@` so repeated runs register
/// distinct identities. Addresses without `@` are returned unchanged.
pub fn unique_address(email: &str, millis: i64) -> String {
    email.replacen('@', &format!("+{}@", millis), 1)
}

/// First `max` characters followed by `...`
pub fn preview(value: &str, max: usize) -> String {
    let head: String = value.chars().take(max).collect();
    format!("{}...", head)
}

/// Epoch seconds to ISO-8601 UTC with millisecond precision
pub fn format_epoch_secs(secs: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current time as epoch seconds
pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}
