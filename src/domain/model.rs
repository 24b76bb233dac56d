use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: BTreeMap<String, serde_json::Value>,
}

/// Input/output file format of a record batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    Json,
    Csv,
}

impl RecordFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Json => "json",
            RecordFormat::Csv => "csv",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(RecordFormat::Json),
            "csv" => Some(RecordFormat::Csv),
            _ => None,
        }
    }

    /// 依副檔名推斷格式
    pub fn from_path(path: &str) -> Option<Self> {
        std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }
}

/// 一批記錄經過抽取後的結果，CSV 需要保留欄位順序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    pub records: Vec<Record>,
    pub columns: Vec<String>,
}

/// Per-field conversion counters collected while normalizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStats {
    pub converted: usize,
    pub passed_through: usize,
    pub cleared: usize,
    pub skipped: usize,
}

impl FieldStats {
    pub fn merge(&mut self, other: FieldStats) {
        self.converted += other.converted;
        self.passed_through += other.passed_through;
        self.cleared += other.cleared;
        self.skipped += other.skipped;
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub batch: RecordBatch,
    pub stats: FieldStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeReport {
    pub records: usize,
    pub stats: FieldStats,
    pub output_path: String,
}
