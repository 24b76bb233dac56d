use crate::core::ist::{convert_to_ist, Conversion};
use crate::domain::model::{FieldStats, Record};
use crate::utils::error::{IstError, Result};
use serde_json::Value;

/// Rewrites the configured timestamp fields of each record to IST.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    fields: Vec<String>,
    strict: bool,
}

impl RecordNormalizer {
    pub fn new(fields: Vec<String>) -> Self {
        Self {
            fields,
            strict: false,
        }
    }

    /// 嚴格模式：無法解析的值直接回傳錯誤，而不是原樣保留
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn normalize(&self, record: &mut Record) -> Result<FieldStats> {
        let mut stats = FieldStats::default();

        for field in &self.fields {
            let Some(value) = record.data.get_mut(field) else {
                continue;
            };

            let conversion = match value {
                Value::Null => continue,
                Value::String(raw) => convert_to_ist(Some(raw.as_str())),
                other => {
                    tracing::debug!(field = %field, value = %other, "skipping non-string timestamp field");
                    stats.skipped += 1;
                    continue;
                }
            };

            match conversion {
                Conversion::Absent => {
                    *value = Value::Null;
                    stats.cleared += 1;
                }
                Conversion::Converted(converted) => {
                    *value = Value::String(converted);
                    stats.converted += 1;
                }
                Conversion::PassedThrough(original) => {
                    if self.strict {
                        return Err(IstError::UnparsableField {
                            field: field.clone(),
                            value: original,
                        });
                    }
                    tracing::warn!(field = %field, value = %original, "left unparsable timestamp as-is");
                    stats.passed_through += 1;
                }
            }
        }

        Ok(stats)
    }

    pub fn normalize_all(&self, records: &mut [Record]) -> Result<FieldStats> {
        let mut total = FieldStats::default();
        for (index, record) in records.iter_mut().enumerate() {
            let stats = self.normalize(record).map_err(|e| {
                tracing::error!(record = index, "normalization failed: {}", e);
                e
            })?;
            total.merge(stats);
        }
        Ok(total)
    }
}
