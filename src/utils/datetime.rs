use chrono::{DateTime, NaiveDate, Utc};

/// The calendar day used for once-per-day gating (UTC)
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Formats a stored RFC 3339 timestamp for chat output, falling back to the raw value
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| format_datetime(&dt.with_timezone(&Utc)))
        .unwrap_or_else(|_| raw.to_string())
}
