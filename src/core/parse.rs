use crate::utils::error::{IstError, Result};
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, ParseError, TimeZone, Timelike, Utc,
};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Offset-bearing layouts tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    // Example: 2025-08-20T15:23:45+0200, 2025-08-20T15:23:45+02
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
    // 基本格式 Example: 20250820T152345+0200
    "%Y%m%dT%H%M%S%.f%#z",
    "%Y%m%dT%H%M%#z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

/// Calendar, ordinal and ISO week dates.
// 基本格式的序數日期要先於 %Y%m%d，否則 2024031 會被讀成 2024-03-01
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%j",
    "%G-W%V-%u",
    "%Y%j",
    "%Y%m%d",
    "%GW%V%u",
];

/// Parse an ISO-8601 timestamp.
///
/// Values with an offset keep it; values without one are read as UTC wall
/// clock time, and a bare date means midnight UTC. Sub-microsecond digits are
/// dropped. Leap seconds (`23:59:60`) are rejected. On failure the error of
/// the last layout attempted is reported.
pub fn parse_iso8601(input: &str) -> Result<DateTime<FixedOffset>> {
    let expanded = expand_hour_only(input);
    let dt = parse_any(&expanded).map_err(|err| unparsable(input, err.to_string()))?;

    if dt.nanosecond() >= 1_000_000_000 {
        return Err(unparsable(input, "leap seconds are not supported".to_string()));
    }

    Ok(truncate_to_micros(dt))
}

fn unparsable(input: &str, reason: String) -> IstError {
    IstError::UnparsableTimestamp {
        value: input.to_string(),
        reason,
    }
}

/// `2024-03-10T10` → `2024-03-10T10:00`, `20240310T10+05` → `20240310T1000+05`
fn expand_hour_only(input: &str) -> Cow<'_, str> {
    static HOUR_ONLY: OnceLock<Regex> = OnceLock::new();
    let re = HOUR_ONLY.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2}[T ]\d{2}|\d{8}T\d{2})([+-]\d{2}(?::?\d{2})?)?$")
            .expect("hour-only pattern is valid")
    });

    match re.captures(input) {
        Some(caps) => {
            let head = &caps[1];
            let minutes = if head.contains('-') { ":00" } else { "00" };
            let offset = caps.get(2).map_or("", |m| m.as_str());
            Cow::Owned(format!("{head}{minutes}{offset}"))
        }
        None => Cow::Borrowed(input),
    }
}

fn parse_any(input: &str) -> std::result::Result<DateTime<FixedOffset>, ParseError> {
    let mut last_err = match DateTime::parse_from_rfc3339(input) {
        Ok(dt) => return Ok(dt),
        Err(err) => err,
    };

    for format in OFFSET_FORMATS {
        match DateTime::parse_from_str(input, format) {
            Ok(dt) => return Ok(dt),
            Err(err) => last_err = err,
        }
    }

    // 沒有時區標記：視為 UTC，不移動時鐘數值
    for format in NAIVE_FORMATS {
        match NaiveDateTime::parse_from_str(input, format) {
            Ok(naive) => return Ok(Utc.from_utc_datetime(&naive).fixed_offset()),
            Err(err) => last_err = err,
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(Utc
                .from_utc_datetime(&date.and_time(NaiveTime::default()))
                .fixed_offset());
        }
    }

    Err(last_err)
}

fn truncate_to_micros(dt: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let micros_only = dt.nanosecond() / 1_000 * 1_000;
    dt.with_nanosecond(micros_only).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_parses_rfc3339_with_offset() {
        let dt = parse_iso8601("2024-03-10T10:00:00+05:30").unwrap();
        assert_eq!(dt.offset(), &FixedOffset::east_opt(19_800).unwrap());
        assert_eq!(dt.to_rfc3339(), "2024-03-10T10:00:00+05:30");
    }

    #[test]
    fn test_parses_compact_offset_and_space_separator() {
        let compact = parse_iso8601("2025-08-20T15:23:45+0200").unwrap();
        assert_eq!(compact.offset(), &FixedOffset::east_opt(7_200).unwrap());

        let spaced = parse_iso8601("2025-08-20 15:23:45-04:00").unwrap();
        assert_eq!(spaced.offset(), &FixedOffset::west_opt(4 * 3_600).unwrap());
    }

    #[test]
    fn test_parses_hour_only_offset() {
        let dt = parse_iso8601("2024-03-10T10:00:00+05").unwrap();
        assert_eq!(dt.offset(), &FixedOffset::east_opt(5 * 3_600).unwrap());
        assert_eq!(dt.naive_utc().to_string(), "2024-03-10 05:00:00");

        let minutes = parse_iso8601("2024-03-10T10:00-03").unwrap();
        assert_eq!(minutes.naive_utc().to_string(), "2024-03-10 13:00:00");
    }

    #[test]
    fn test_parses_basic_format() {
        let dt = parse_iso8601("20240310T100000+00:00").unwrap();
        assert_eq!(dt.naive_utc().to_string(), "2024-03-10 10:00:00");

        let compact = parse_iso8601("20240310T153000.5+0530").unwrap();
        assert_eq!(compact.naive_utc().to_string(), "2024-03-10 10:00:00.500");

        let naive = parse_iso8601("20240310T1000").unwrap();
        assert_eq!(naive.offset(), &utc_offset());
        assert_eq!(naive.naive_utc().to_string(), "2024-03-10 10:00:00");
    }

    #[test]
    fn test_parses_hour_only_time() {
        let naive = parse_iso8601("2024-03-10T10").unwrap();
        assert_eq!(naive.naive_utc().to_string(), "2024-03-10 10:00:00");

        let with_offset = parse_iso8601("2024-03-10T10+00:00").unwrap();
        assert_eq!(with_offset.naive_utc().to_string(), "2024-03-10 10:00:00");

        let basic = parse_iso8601("20240310T10+05").unwrap();
        assert_eq!(basic.naive_utc().to_string(), "2024-03-10 05:00:00");
    }

    #[test]
    fn test_naive_values_are_read_as_utc() {
        let dt = parse_iso8601("2024-01-01T00:00:00").unwrap();
        assert_eq!(dt.offset(), &utc_offset());
        assert_eq!(dt.naive_utc().to_string(), "2024-01-01 00:00:00");

        let minutes_only = parse_iso8601("2024-01-01 09:15").unwrap();
        assert_eq!(minutes_only.naive_utc().to_string(), "2024-01-01 09:15:00");
    }

    #[test]
    fn test_bare_date_is_midnight_utc() {
        let dt = parse_iso8601("2024-02-29").unwrap();
        assert_eq!(dt.naive_utc().to_string(), "2024-02-29 00:00:00");

        let basic = parse_iso8601("20240229").unwrap();
        assert_eq!(basic, dt);
    }

    #[test]
    fn test_week_and_ordinal_dates() {
        // 2024-W10-7 與 2024-070 都是 2024-03-10（星期日）
        for value in ["2024-W10-7", "2024W107", "2024-070", "2024070"] {
            let dt = parse_iso8601(value).unwrap();
            assert_eq!(dt.naive_utc().to_string(), "2024-03-10 00:00:00", "value: {value}");
        }

        let january = parse_iso8601("2024031").unwrap();
        assert_eq!(january.naive_utc().to_string(), "2024-01-31 00:00:00");
    }

    #[test]
    fn test_fraction_is_truncated_to_microseconds() {
        let dt = parse_iso8601("2024-01-01T00:00:00.123456789+00:00").unwrap();
        assert_eq!(dt.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_rejects_leap_second() {
        let err = parse_iso8601("2016-12-31T23:59:60+00:00").unwrap_err();
        match err {
            IstError::UnparsableTimestamp { value, .. } => {
                assert_eq!(value, "2016-12-31T23:59:60+00:00")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(parse_iso8601("2016-12-31T23:59:60").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_iso8601("not-a-date").is_err());
        assert!(parse_iso8601("").is_err());
        assert!(parse_iso8601("2024-13-01T00:00:00").is_err());
        assert!(parse_iso8601("10:00:00").is_err());
        assert!(parse_iso8601("2024-99-99").is_err());
        assert!(parse_iso8601("2024-03-10T10:00:00+05:30:15").is_err());
    }
}
