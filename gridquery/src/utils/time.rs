//! Date parsing and display helpers

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use thiserror::Error;

use crate::core::constants::{DISPLAY_DATE_TIME_FORMAT, DISPLAY_TIMEZONE, FILTER_DATE_FORMAT};

/// Filter text that is not a `day/month/year` date
#[derive(Debug, Clone, Error)]
#[error("'{input}' is not a day/month/year date")]
pub struct DateParseError {
    pub input: String,
    #[source]
    source: chrono::ParseError,
}

/// Parse a filter value in the fixed `day/month/year` format.
///
/// Day and month may be one or two digits. Impossible dates such as
/// `31/02/2025` are rejected instead of rolling over into the next month
/// (lenient `d/m/Y` parsers read it as `03/03/2025`).
pub fn parse_filter_date(text: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(text, FILTER_DATE_FORMAT).map_err(|source| DateParseError {
        input: text.to_string(),
        source,
    })
}

/// Render an RFC 3339 timestamp as `dd/mm/YYYY, HH:MM` in `tz`.
///
/// Missing or unparseable input renders as an empty string.
pub fn format_date_time(iso: Option<&str>, tz: Tz) -> String {
    iso.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&tz).format(DISPLAY_DATE_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// `format_date_time` in the default display time zone
pub fn format_local_date_time(iso: Option<&str>) -> String {
    format_date_time(iso, DISPLAY_TIMEZONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_day_month_year() {
        assert_eq!(
            parse_filter_date("15/09/2025").unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
        );
        assert_eq!(
            parse_filter_date("1/2/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_rejects_other_shapes() {
        // 31/02 is an error, never 03/03
        for input in ["2025-09-15", "15/09", "Bob", "", "31/02/2025", "15/09/2025 extra"] {
            assert!(parse_filter_date(input).is_err(), "input {input:?}");
        }
    }

    #[test]
    fn test_parse_error_names_input() {
        let err = parse_filter_date("tomorrow").unwrap_err();
        assert_eq!(err.input, "tomorrow");
        assert!(err.to_string().contains("tomorrow"));
    }

    #[test]
    fn test_formats_utc_timestamp_in_display_zone() {
        assert_eq!(
            format_local_date_time(Some("2025-09-15T14:30:00Z")),
            "15/09/2025, 17:30"
        );
        assert_eq!(
            format_date_time(Some("2025-01-15T14:30:00Z"), chrono_tz::UTC),
            "15/01/2025, 14:30"
        );
    }

    #[test]
    fn test_formats_missing_as_empty() {
        assert_eq!(format_local_date_time(None), "");
        assert_eq!(format_local_date_time(Some("not a date")), "");
    }
}
