//! India Standard Time rendering.
//!
//! IST has no daylight saving, so conversion is a constant +05:30 shift
//! rather than a timezone database lookup.

use crate::core::clock::SystemClock;
use crate::core::parse::parse_iso8601;
use crate::domain::ports::Clock;
use crate::utils::error::{IstError, Result};
use chrono::{DateTime, FixedOffset, TimeZone};
use std::borrow::Cow;

pub const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

pub fn ist_offset() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECONDS).expect("UTC+05:30 is a valid fixed offset")
}

/// Shift any instant into +05:30. The instant itself is unchanged.
pub fn to_ist<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<FixedOffset> {
    dt.with_timezone(&ist_offset())
}

/// Render as `YYYY-MM-DDTHH:MM:SS[.ffffff]+05:30`.
///
/// Fractional seconds are written with six digits, and only when non-zero.
pub fn format_ist_iso(dt: &DateTime<FixedOffset>) -> String {
    if dt.timestamp_subsec_micros() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
    }
}

pub fn now_ist() -> DateTime<FixedOffset> {
    to_ist(&SystemClock.now_utc())
}

/// Current time as an ISO-8601 string carrying `+05:30`.
pub fn now_ist_iso() -> String {
    now_ist_iso_with(&SystemClock)
}

pub fn now_ist_iso_with<C: Clock + ?Sized>(clock: &C) -> String {
    format_ist_iso(&to_ist(&clock.now_utc()))
}

/// Outcome of normalizing one raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Input was missing or blank.
    Absent,
    Converted(String),
    /// Input could not be parsed; holds the original, untrimmed string.
    PassedThrough(String),
}

impl Conversion {
    pub fn into_option(self) -> Option<String> {
        match self {
            Conversion::Absent => None,
            Conversion::Converted(value) | Conversion::PassedThrough(value) => Some(value),
        }
    }
}

pub fn convert_to_ist(value: Option<&str>) -> Conversion {
    let Some(raw) = value else {
        return Conversion::Absent;
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Conversion::Absent;
    }

    match parse_trimmed(trimmed) {
        Ok(dt) => Conversion::Converted(format_ist_iso(&to_ist(&dt))),
        Err(err) => {
            tracing::debug!(value = raw, error = %err, "timestamp not parsable, passing through");
            Conversion::PassedThrough(raw.to_string())
        }
    }
}

/// Normalize an ISO-8601 string to `+05:30`.
///
/// Missing or blank input yields `None`. Input without an offset is taken as
/// UTC, and a trailing `Z` means UTC. Input that cannot be parsed is returned
/// exactly as given, surrounding whitespace included.
pub fn iso_to_ist_iso(value: Option<&str>) -> Option<String> {
    convert_to_ist(value).into_option()
}

/// Like [`iso_to_ist_iso`], but unparsable or blank input is an error.
pub fn try_iso_to_ist(value: &str) -> Result<DateTime<FixedOffset>> {
    parse_trimmed(value.trim())
        .map(|dt| to_ist(&dt))
        .map_err(|err| match err {
            IstError::UnparsableTimestamp { reason, .. } => IstError::UnparsableTimestamp {
                value: value.to_string(),
                reason,
            },
            other => other,
        })
}

fn parse_trimmed(trimmed: &str) -> Result<DateTime<FixedOffset>> {
    let candidate: Cow<'_, str> = match trimmed.strip_suffix('Z') {
        Some(head) => Cow::Owned(format!("{head}+00:00")),
        None => Cow::Borrowed(trimmed),
    };
    parse_iso8601(&candidate)
}
