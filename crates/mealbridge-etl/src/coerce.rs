//! Text-to-calendar coercion for the date/timestamp fields the sources
//! carry as text.

use chrono::{NaiveDate, NaiveDateTime};

/// Date formats accepted in source files, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Datetime formats accepted in source files, tried in order.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Parse a calendar date from source text.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Parse a timestamp from source text. A bare date is accepted as
/// midnight of that day.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| parse_date(text).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_and_us_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(parse_date("2025-03-15"), Some(expected));
        assert_eq!(parse_date("3/15/2025"), Some(expected));
        assert_eq!(parse_date(" 2025-03-15 "), Some(expected));
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2025-13-01"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn parses_datetime_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime("2025-03-15 14:30:00"), Some(expected));
        assert_eq!(parse_datetime("2025-03-15T14:30:00"), Some(expected));
        assert_eq!(parse_datetime("3/15/2025 14:30"), Some(expected));
    }

    #[test]
    fn bare_date_becomes_midnight() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime("2025-03-15"), Some(expected));
    }

    #[test]
    fn rejects_garbage_datetimes() {
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(parse_datetime("2025-03-15 25:00:00"), None);
    }
}
