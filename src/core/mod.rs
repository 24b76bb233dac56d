pub mod clock;
pub mod engine;
pub mod ist;
pub mod parse;
pub mod pipeline;
pub mod records;
pub mod serde_ist;

pub use crate::domain::model::{Record, TransformResult};
pub use crate::domain::ports::{Clock, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
