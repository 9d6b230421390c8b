//! Human-readable formatting for file sizes and download counters.
//!
//! Both formatters use decimal (SI) units, matching the figures shown on
//! app cards and detail pages.

const KB: f64 = 1_000.0;
const MB: f64 = 1_000_000.0;
const GB: f64 = 1_000_000_000.0;

/// Formats a byte count, e.g. `45000000` -> `"45.0 MB"`.
pub fn format_file_size(bytes: i64) -> String {
    let value = bytes as f64;
    if value >= GB {
        format!("{:.2} GB", value / GB)
    } else if value >= MB {
        format!("{:.1} MB", value / MB)
    } else if value >= KB {
        format!("{:.0} KB", value / KB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Formats a download counter, e.g. `125000` -> `"125K"`, `2340000` -> `"2.3M"`.
///
/// Thousands are floored so a counter never displays higher than it is.
pub fn format_download_count(count: i64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{}K", count / 1_000)
    } else {
        count.to_string()
    }
}
