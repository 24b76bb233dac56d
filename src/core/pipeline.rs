use crate::core::records::RecordNormalizer;
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::domain::model::{NormalizeReport, RecordBatch, RecordFormat};
use crate::utils::error::{IstError, Result};
use serde_json::Value;
use std::collections::BTreeSet;

/// Reads records from a JSON or CSV file, rewrites timestamp fields to IST and
/// writes the batch back out.
pub struct FilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    normalizer: RecordNormalizer,
}

impl<S: Storage, C: ConfigProvider> FilePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let normalizer = RecordNormalizer::new(config.fields().to_vec()).strict(config.strict());
        Self {
            storage,
            config,
            normalizer,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for FilePipeline<S, C> {
    fn extract(&self) -> Result<RecordBatch> {
        let path = self.config.input_path();
        tracing::debug!("Reading {} input from: {}", self.config.input_format().as_str(), path);

        let data = self.storage.read_file(path)?;
        match self.config.input_format() {
            RecordFormat::Json => parse_json_records(&data),
            RecordFormat::Csv => parse_csv_records(&data),
        }
    }

    fn transform(&self, mut batch: RecordBatch) -> Result<TransformResult> {
        let stats = self.normalizer.normalize_all(&mut batch.records)?;
        Ok(TransformResult { batch, stats })
    }

    fn load(&self, result: TransformResult) -> Result<NormalizeReport> {
        let output_path = self.config.output_path();
        let bytes = match self.config.output_format() {
            RecordFormat::Json => serde_json::to_vec_pretty(&result.batch.records)?,
            RecordFormat::Csv => write_csv_records(&result.batch)?,
        };

        tracing::debug!("Writing {} bytes to: {}", bytes.len(), output_path);
        self.storage.write_file(output_path, &bytes)?;

        Ok(NormalizeReport {
            records: result.batch.records.len(),
            stats: result.stats,
            output_path: output_path.to_string(),
        })
    }
}

/// 接受物件陣列或單一物件
pub fn parse_json_records(data: &[u8]) -> Result<RecordBatch> {
    let json: Value = serde_json::from_slice(data)?;

    let items = match json {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(IstError::ProcessingError {
                message: format!("expected a JSON array or object, found {}", json_kind(&other)),
            })
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(obj) => records.push(Record {
                data: obj.into_iter().collect(),
            }),
            other => {
                return Err(IstError::ProcessingError {
                    message: format!("record {} is a {}, not an object", index, json_kind(&other)),
                })
            }
        }
    }

    let columns = collect_columns(&records);
    Ok(RecordBatch { records, columns })
}

pub fn parse_csv_records(data: &[u8]) -> Result<RecordBatch> {
    let mut reader = csv::Reader::from_reader(data);
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let data = columns
            .iter()
            .zip(row.iter())
            .map(|(column, cell)| (column.clone(), Value::String(cell.to_string())))
            .collect();
        records.push(Record { data });
    }

    Ok(RecordBatch { records, columns })
}

pub fn write_csv_records(batch: &RecordBatch) -> Result<Vec<u8>> {
    let columns = if batch.columns.is_empty() {
        collect_columns(&batch.records)
    } else {
        batch.columns.clone()
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;

    for record in &batch.records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| cell_text(record.data.get(column)))
            .collect();
        writer.write_record(&row)?;
    }

    writer.into_inner().map_err(|e| IstError::ProcessingError {
        message: format!("failed to flush CSV output: {}", e),
    })
}

fn collect_columns(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .flat_map(|record| record.data.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
