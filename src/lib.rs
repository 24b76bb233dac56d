//! Render timestamps in India Standard Time (+05:30).
//!
//! ```rust
//! use ist_time::{iso_to_ist_iso, now_ist_iso};
//!
//! assert_eq!(
//!     iso_to_ist_iso(Some("2024-03-10T10:00:00Z")).as_deref(),
//!     Some("2024-03-10T15:30:00+05:30")
//! );
//! assert_eq!(iso_to_ist_iso(Some("not-a-date")).as_deref(), Some("not-a-date"));
//! assert_eq!(iso_to_ist_iso(None), None);
//! assert!(now_ist_iso().ends_with("+05:30"));
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command, NormalizeArgs};

pub use crate::config::{cli::LocalStorage, toml_config::JobConfig};
pub use crate::core::clock::{FixedClock, SystemClock};
pub use crate::core::ist::{
    convert_to_ist, format_ist_iso, ist_offset, iso_to_ist_iso, now_ist, now_ist_iso,
    now_ist_iso_with, to_ist, try_iso_to_ist, Conversion, IST_OFFSET_SECONDS,
};
pub use crate::core::serde_ist;
pub use crate::core::{engine::NormalizeEngine, pipeline::FilePipeline, records::RecordNormalizer};
pub use crate::domain::model::{FieldStats, NormalizeReport, Record, RecordFormat};
pub use crate::utils::error::{IstError, Result};
