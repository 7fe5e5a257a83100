pub mod format;

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, Utc};
use rand::Rng;
use serde_json::Value;

use mockgrid_core::rule::UTC_FORMAT;
use mockgrid_core::{DateSpec, ErrorSink, TableError};

pub use format::{format_date, utc_string};

/// Naive layouts accepted for date-time literals, interpreted as UTC.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date literal: RFC 3339, RFC 2822, a naive date or date-time, or a
/// number of milliseconds since the Unix epoch.
pub fn parse_date_literal(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(number) => {
            let millis = number
                .as_i64()
                .or_else(|| number.as_f64().map(|millis| millis.trunc() as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        Value::String(text) => parse_date_text(text.trim()),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }
    for layout in DATETIME_LAYOUTS {
        if let Ok(date) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(date.and_utc());
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(text, layout) {
            return date.and_hms_opt(0, 0, 0).map(|date| date.and_utc());
        }
    }
    None
}

/// Default upper bound: five calendar years after `now`.
pub fn default_end(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_add_months(Months::new(5 * 12)).unwrap_or(now)
}

/// Uniform instant in `[start, end]` at millisecond resolution.
pub fn sample_instant<R: Rng + ?Sized>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rng: &mut R,
) -> DateTime<Utc> {
    let millis = rng.random_range(start.timestamp_millis()..=end.timestamp_millis());
    DateTime::from_timestamp_millis(millis).unwrap_or(start)
}

/// Resolve a date rule into formatted text, recording any invalid bound.
pub fn resolve_date<R: Rng + ?Sized>(
    spec: &DateSpec,
    column: &str,
    sink: &mut ErrorSink,
    rng: &mut R,
) -> String {
    let start = match spec.start.as_ref() {
        None => DateTime::UNIX_EPOCH,
        Some(literal) => match parse_date_literal(literal) {
            Some(start) => start,
            None => {
                sink.record(TableError::InvalidStartDate {
                    column: column.to_string(),
                });
                return String::new();
            }
        },
    };
    let end = match spec.end.as_ref() {
        None => default_end(Utc::now()),
        Some(literal) => match parse_date_literal(literal) {
            Some(end) => end,
            None => {
                sink.record(TableError::InvalidEndDate {
                    column: column.to_string(),
                });
                return String::new();
            }
        },
    };
    if start > end {
        sink.record(TableError::StartAfterEnd {
            column: column.to_string(),
        });
        return String::new();
    }

    let instant = sample_instant(start, end, rng);
    match spec.format() {
        UTC_FORMAT => utc_string(&instant),
        format => format_date(&instant, format),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_supported_literals() {
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 5, 0, 0, 0)
            .single()
            .expect("valid date");
        assert_eq!(parse_date_literal(&json!("2024-03-05")), Some(expected));
        assert_eq!(parse_date_literal(&json!("2024/03/05")), Some(expected));
        assert_eq!(
            parse_date_literal(&json!("2024-03-05T00:00:00Z")),
            Some(expected)
        );
        assert_eq!(
            parse_date_literal(&json!("2024-03-05T02:00:00+02:00")),
            Some(expected)
        );
        assert_eq!(
            parse_date_literal(&json!("Tue, 05 Mar 2024 00:00:00 GMT")),
            Some(expected)
        );
        assert_eq!(
            parse_date_literal(&json!(expected.timestamp_millis())),
            Some(expected)
        );
    }

    #[test]
    fn rejects_garbage_literals() {
        assert_eq!(parse_date_literal(&json!("not a date")), None);
        assert_eq!(parse_date_literal(&json!("2024-13-45")), None);
        assert_eq!(parse_date_literal(&json!(true)), None);
    }

    #[test]
    fn default_end_is_five_years_out() {
        let now = Utc
            .with_ymd_and_hms(2024, 2, 29, 12, 0, 0)
            .single()
            .expect("valid date");
        let end = default_end(now);
        assert_eq!(end.format("%Y-%m-%d %H:%M").to_string(), "2029-02-28 12:00");
    }
}
