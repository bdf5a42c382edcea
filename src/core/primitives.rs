use chrono::{DateTime, Utc};

#[must_use]
pub fn unix_millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

/// Short bottom-axis label such as `Mar 7`.
///
/// Timestamps outside chrono's range fall back to the raw millisecond value.
#[must_use]
pub fn format_day_label(millis: i64) -> String {
    match unix_millis_to_datetime(millis) {
        Some(time) => time.format("%b %-d").to_string(),
        None => millis.to_string(),
    }
}

/// Legend header for a selected sample such as `Thu, 7 Mar 2024`.
#[must_use]
pub fn format_selection_date(millis: i64) -> String {
    match unix_millis_to_datetime(millis) {
        Some(time) => time.format("%a, %-d %b %Y").to_string(),
        None => millis.to_string(),
    }
}
