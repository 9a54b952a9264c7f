//! Small helpers shared by the server and its tests

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format a Unix-millis timestamp as `YYYY-MM-DD HH:MM` (UTC)
///
/// Out-of-range values render as an empty string.
pub fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Interpret an HTML checkbox value
///
/// Browsers omit unchecked boxes entirely, so any submitted value counts as
/// checked except the explicit "off"/"false"/"0" some clients send.
pub fn checkbox(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) => !matches!(v.trim(), "off" | "false" | "0"),
    }
}
