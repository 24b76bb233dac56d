use crate::core::Pipeline;
use crate::domain::model::NormalizeReport;
use crate::utils::error::Result;

pub struct NormalizeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> NormalizeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<NormalizeReport> {
        tracing::info!("Starting timestamp normalization...");

        // Extract
        let batch = self.pipeline.extract()?;
        tracing::info!("Extracted {} records", batch.records.len());

        // Transform
        let result = self.pipeline.transform(batch)?;
        tracing::info!(
            converted = result.stats.converted,
            passed_through = result.stats.passed_through,
            cleared = result.stats.cleared,
            skipped = result.stats.skipped,
            "Normalized {} records",
            result.batch.records.len()
        );

        // Load
        let report = self.pipeline.load(result)?;
        tracing::info!("Output saved to: {}", report.output_path);

        Ok(report)
    }
}
