//! Serde adapters that write timestamps as `+05:30` ISO strings.
//!
//! ```rust
//! use chrono::{DateTime, FixedOffset};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Trade {
//!     #[serde(with = "ist_time::serde_ist")]
//!     entry_time: DateTime<FixedOffset>,
//!     #[serde(with = "ist_time::serde_ist::option", default)]
//!     exit_time: Option<DateTime<FixedOffset>>,
//! }
//! ```
//!
//! Deserializing accepts every shape [`try_iso_to_ist`] accepts and yields
//! the value already shifted to IST.

use crate::core::ist::{format_ist_iso, to_ist, try_iso_to_ist};
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S, Tz>(value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    Tz: TimeZone,
{
    serializer.serialize_str(&format_ist_iso(&to_ist(value)))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    try_iso_to_ist(&raw).map_err(de::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S, Tz>(value: &Option<DateTime<Tz>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        Tz: TimeZone,
    {
        match value {
            Some(dt) => serializer.serialize_some(&format_ist_iso(&to_ist(dt))),
            None => serializer.serialize_none(),
        }
    }

    /// `null` and blank strings both become `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => {
                try_iso_to_ist(&raw).map(Some).map_err(de::Error::custom)
            }
            _ => Ok(None),
        }
    }
}
