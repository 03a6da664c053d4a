//! UTC date formatting for rendered cards.
//!
//! All times on preview cards are rendered in UTC; the card footer says so.

use chrono::{DateTime, Utc};

/// Format a timestamp as e.g. "Mar 4 @ 5:07 PM".
pub fn format_day_time(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d @ %-I:%M %p").to_string()
}

/// Format a timestamp as e.g. "Mar 4".
pub fn format_day(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d").to_string()
}
