//! Human-readable rendering of sizes and timestamps for text payloads.

use chrono::{Local, TimeZone};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Render a byte count with a binary unit suffix.
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Render a unix-millisecond timestamp in local time.
pub fn format_timestamp(millis: u64) -> String {
    match Local.timestamp_millis_opt(millis as i64).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "unknown".to_string(),
    }
}

/// Created timestamps are unavailable on some filesystems.
pub fn format_optional_timestamp(millis: Option<u64>) -> String {
    match millis {
        Some(ms) => format_timestamp(ms),
        None => "unknown".to_string(),
    }
}
