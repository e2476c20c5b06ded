//! Timestamp and date utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Date format accepted in edit payloads (`2006-07-16`)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format returned by the metadata enrichment service (`16.07.2006`)
pub const ENRICHMENT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

/// Parse a strict `DD.MM.YYYY` date
pub fn parse_enrichment_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, ENRICHMENT_DATE_FORMAT).ok()
}
