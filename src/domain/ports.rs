use crate::domain::model::{NormalizeReport, RecordBatch, RecordFormat, TransformResult};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// Source of the current instant, so time-dependent output can be pinned in tests.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn input_format(&self) -> RecordFormat;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> RecordFormat;
    fn fields(&self) -> &[String];
    fn strict(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<RecordBatch>;
    fn transform(&self, batch: RecordBatch) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<NormalizeReport>;
}
