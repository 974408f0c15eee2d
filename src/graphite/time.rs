//! Time period and interval parsing for the Graphite backend.
//!
//! Graphite's own parser accepts any string starting with the shortest
//! unique prefix of a unit; this one is stricter and only accepts the
//! exact aliases in the unit table.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors from parsing interval or time-expression strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// The string is not `<count><unit>` or the unit is unknown
    #[error("Invalid interval string: {0:?}")]
    InvalidInterval(String),

    /// Well-formed but deliberately unimplemented absolute date expression
    #[error("Absolute time specifiers not supported: {0:?}")]
    AbsoluteTimeUnsupported(String),
}

static INTERVAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(.+)$").expect("invalid interval regex"));

/// Seconds per unit for every accepted unit alias.
///
/// Months are fixed 30-day months and years fixed 365-day years, matching
/// Graphite's summarize conventions.
fn unit_seconds(unit: &str) -> Option<u64> {
    match unit {
        "s" | "second" | "seconds" => Some(1),
        "min" | "minute" | "minutes" => Some(60),
        "h" | "hour" | "hours" => Some(3600),
        "d" | "day" | "days" => Some(86_400),
        "w" | "week" | "weeks" => Some(7 * 86_400),
        "mon" | "month" | "months" => Some(30 * 86_400),
        "y" | "year" | "years" => Some(365 * 86_400),
        _ => None,
    }
}

/// Parse an interval specifier of the form `<count><unit>` into a number
/// of seconds.
///
/// The count is an unsigned integer (leading zeros allowed, no sign) and
/// the unit must exactly match one of the alias table entries.
pub fn interval_to_seconds(interval: &str) -> Result<u64, TimeParseError> {
    let invalid = || TimeParseError::InvalidInterval(interval.to_string());

    let caps = INTERVAL_RE.captures(interval).ok_or_else(invalid)?;
    let count: u64 = caps[1].parse().map_err(|_| invalid())?;
    let multiplier = unit_seconds(&caps[2]).ok_or_else(invalid)?;

    count.checked_mul(multiplier).ok_or_else(invalid)
}

/// Parse a Graphite-compatible time specifier into an absolute instant,
/// relative to the supplied `now`.
///
/// Recognizes the keywords `now`, `today`, `yesterday` and `tomorrow`,
/// plus relative offsets of the form `-<count><unit>`. Absolute dates are
/// a permanent limitation and always fail with
/// [`TimeParseError::AbsoluteTimeUnsupported`].
pub fn parse_time(time: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeParseError> {
    match time {
        "now" | "today" => Ok(now),
        "yesterday" => Ok(now - Duration::days(1)),
        "tomorrow" => Ok(now + Duration::days(1)),
        _ => {
            if let Some(rest) = time.strip_prefix('-') {
                let seconds = interval_to_seconds(rest)?;
                // Grammatically valid offsets can still exceed what the
                // time types represent; those are invalid input, not a
                // panic.
                let out_of_range = || TimeParseError::InvalidInterval(rest.to_string());
                let offset = i64::try_from(seconds)
                    .ok()
                    .and_then(Duration::try_seconds)
                    .ok_or_else(out_of_range)?;
                now.checked_sub_signed(offset).ok_or_else(out_of_range)
            } else {
                Err(TimeParseError::AbsoluteTimeUnsupported(time.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assert_interval(expected: u64, inputs: &[&str]) {
        for input in inputs {
            assert_eq!(
                interval_to_seconds(input),
                Ok(expected),
                "interval {:?}",
                input
            );
        }
    }

    fn assert_invalid(input: &str) {
        assert_eq!(
            interval_to_seconds(input),
            Err(TimeParseError::InvalidInterval(input.to_string()))
        );
    }

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2014, 6, 12, 10, 30, 0).unwrap()
    }

    #[test]
    fn invalid_interval_strings() {
        assert_invalid("");
        assert_invalid("s");
        assert_invalid("1");
        assert_invalid("three days");
        assert_invalid("-1h");
        assert_invalid("2fortnights");
    }

    #[test]
    fn interval_seconds() {
        assert_interval(0, &["0s", "0second", "0seconds"]);
        assert_interval(1, &["1s", "1second", "1seconds"]);
        assert_interval(60, &["60s", "60second", "60seconds"]);
        assert_interval(1_234_567, &["1234567s", "1234567second", "1234567seconds"]);
        assert_interval(12, &["012s", "012second", "012seconds"]);
    }

    #[test]
    fn interval_minutes() {
        assert_interval(0, &["0min", "0minute", "0minutes"]);
        assert_interval(60, &["1min", "1minute", "1minutes"]);
        assert_interval(3600, &["60min", "60minute", "60minutes"]);
        assert_interval(720, &["012min", "012minute", "012minutes"]);
    }

    #[test]
    fn interval_hours() {
        assert_interval(0, &["0h", "0hour", "0hours"]);
        assert_interval(3600, &["1h", "1hour", "1hours"]);
        assert_interval(60 * 3600, &["60h", "60hour", "60hours"]);
        assert_interval(12 * 3600, &["012h", "012hour", "012hours"]);
    }

    #[test]
    fn interval_days() {
        assert_interval(0, &["0d", "0day", "0days"]);
        assert_interval(86_400, &["1d", "1day", "1days"]);
        assert_interval(60 * 86_400, &["60d", "60day", "60days"]);
    }

    #[test]
    fn interval_weeks() {
        assert_interval(0, &["0w", "0week", "0weeks"]);
        assert_interval(7 * 86_400, &["1w", "1week", "1weeks"]);
        assert_interval(60 * 7 * 86_400, &["60w", "60week", "60weeks"]);
    }

    #[test]
    fn interval_months() {
        assert_interval(0, &["0mon", "0month", "0months"]);
        assert_interval(30 * 86_400, &["1mon", "1month", "1months"]);
        assert_interval(60 * 30 * 86_400, &["60mon", "60month", "60months"]);
    }

    #[test]
    fn interval_years() {
        assert_interval(0, &["0y", "0year", "0years"]);
        assert_interval(365 * 86_400, &["1y", "1year", "1years"]);
        assert_interval(60 * 365 * 86_400, &["60y", "60year", "60years"]);
    }

    #[test]
    fn parse_time_keywords() {
        let now = test_now();
        assert_eq!(parse_time("now", now), Ok(now));
        assert_eq!(parse_time("today", now), Ok(now));
        assert_eq!(parse_time("yesterday", now), Ok(now - Duration::days(1)));
        assert_eq!(parse_time("tomorrow", now), Ok(now + Duration::days(1)));
    }

    #[test]
    fn parse_time_relative_offsets() {
        let now = test_now();
        assert_eq!(parse_time("-0s", now), Ok(now));
        assert_eq!(parse_time("-1s", now), Ok(now - Duration::seconds(1)));
        assert_eq!(parse_time("-2w", now), Ok(now - Duration::days(14)));
        assert_eq!(parse_time("-48h", now), Ok(now - Duration::hours(48)));
    }

    #[test]
    fn parse_time_bad_offset_propagates_parse_error() {
        let now = test_now();
        assert_eq!(
            parse_time("-1fortnight", now),
            Err(TimeParseError::InvalidInterval("1fortnight".to_string()))
        );
    }

    #[test]
    fn parse_time_rejects_offsets_beyond_duration_range() {
        // Parses as an interval but exceeds what a Duration can hold.
        let now = test_now();
        assert_eq!(
            parse_time("-100000000000000000s", now),
            Err(TimeParseError::InvalidInterval(
                "100000000000000000s".to_string()
            ))
        );
    }

    #[test]
    fn parse_time_rejects_offsets_beyond_datetime_range() {
        // Fits in a Duration but lands before the earliest representable
        // instant.
        let now = test_now();
        assert_eq!(
            parse_time("-400000y", now),
            Err(TimeParseError::InvalidInterval("400000y".to_string()))
        );
    }

    #[test]
    fn parse_time_rejects_counts_beyond_signed_range() {
        // u64::MAX seconds must error, never wrap into a future instant.
        let now = test_now();
        assert_eq!(
            parse_time("-18446744073709551615s", now),
            Err(TimeParseError::InvalidInterval(
                "18446744073709551615s".to_string()
            ))
        );
    }

    #[test]
    fn parse_time_relative_offsets_never_resolve_to_the_future() {
        let now = test_now();
        for expr in ["-0s", "-1s", "-2w", "-9223372036854775807s"] {
            if let Ok(resolved) = parse_time(expr, now) {
                assert!(resolved <= now, "offset {:?} resolved past now", expr);
            }
        }
    }

    #[test]
    fn parse_time_absolute_unsupported() {
        let now = test_now();
        for expr in ["2014-01-01", "12:00 2014-06-01", "june 1 2014", "monday"] {
            assert_eq!(
                parse_time(expr, now),
                Err(TimeParseError::AbsoluteTimeUnsupported(expr.to_string()))
            );
        }
    }

    #[test]
    fn parse_is_pure() {
        let now = test_now();
        assert_eq!(interval_to_seconds("30min"), interval_to_seconds("30min"));
        assert_eq!(parse_time("-2w", now), parse_time("-2w", now));
    }
}
