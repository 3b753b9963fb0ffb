//! Date parsing shared by the loader and the date accessor.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Accepts the ISO-8601 shapes produced by spreadsheet exports:
/// `YYYY-MM`, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` with an optional
/// `Z` or `±HH:MM` suffix. Offsets are normalized to UTC.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    // Cheap rejection before trying each format
    if s.len() < 7 || !s.as_bytes()[..4].iter().all(u8::is_ascii_digit) || s.as_bytes()[4] != b'-'
    {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    if s.len() == 7 {
        return NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Milliseconds since the Unix epoch
pub fn to_timestamp_millis(date: &NaiveDateTime) -> f64 {
    date.and_utc().timestamp_millis() as f64
}

pub fn from_timestamp_millis(ts: f64) -> Option<NaiveDateTime> {
    if !ts.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ts.round() as i64).map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_plain_date() {
        let d = parse_date("2024-03-15").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 3, 15));
        assert_eq!(d.hour(), 0);
    }

    #[test]
    fn test_parse_year_month() {
        let d = parse_date("2024-03").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 3, 1));
    }

    #[test]
    fn test_parse_datetime_variants() {
        assert_eq!(parse_date("2024-03-15T10:30").unwrap().minute(), 30);
        assert_eq!(parse_date("2024-03-15T10:30:12").unwrap().second(), 12);
        assert_eq!(
            parse_date("2024-03-15T10:30:12.250Z")
                .unwrap()
                .and_utc()
                .timestamp_subsec_millis(),
            250
        );
        // offset normalized to UTC
        assert_eq!(parse_date("2024-03-15T10:30:00+02:00").unwrap().hour(), 8);
    }

    #[test]
    fn test_reject_non_dates() {
        assert!(parse_date("2024").is_none());
        assert!(parse_date("hello world").is_none());
        assert!(parse_date("12.5").is_none());
        assert!(parse_date("2024-13-01").is_none());
    }

    #[test]
    fn test_timestamp_round_trip() {
        let d = parse_date("2001-09-09T01:46:40").unwrap();
        assert_eq!(to_timestamp_millis(&d), 1_000_000_000_000.0);
        assert_eq!(from_timestamp_millis(1_000_000_000_000.0), Some(d));
        assert_eq!(from_timestamp_millis(f64::NAN), None);
    }
}
