//! Date parsing for request payloads.
//!
//! Inputs without an offset are interpreted in the venue timezone (UTC+8).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Offset applied to dates and datetimes that carry no timezone.
const LOCAL_OFFSET_SECONDS: i32 = 8 * 3600;

fn local_offset() -> Option<FixedOffset> {
    FixedOffset::east_opt(LOCAL_OFFSET_SECONDS)
}

/// Parses an RFC 3339 timestamp, a `YYYY-MM-DDTHH:MM[:SS]` local datetime, or a
/// `YYYY-MM-DD` date (local midnight).
///
/// # Returns
/// - `Some(DateTime<Utc>)` - Parsed instant
/// - `None` - Input matches none of the accepted formats
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })?;

    local_offset()?
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

/// Parses a `YYYY-MM-DD` calendar date such as a birthday.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_only_is_local_midnight() {
        let parsed = parse_datetime("2025-01-01").unwrap();

        assert_eq!(parsed.to_rfc3339(), "2024-12-31T16:00:00+00:00");
    }

    #[test]
    fn rfc3339_keeps_its_offset() {
        let parsed = parse_datetime("2025-01-10T12:00:00Z").unwrap();

        assert_eq!(parsed.to_rfc3339(), "2025-01-10T12:00:00+00:00");
    }

    #[test]
    fn local_datetime_without_seconds() {
        let parsed = parse_datetime("2025-01-10T09:30").unwrap();

        assert_eq!(parsed.to_rfc3339(), "2025-01-10T01:30:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("next tuesday").is_none());
        assert!(parse_date("2025-13-01").is_none());
    }
}
