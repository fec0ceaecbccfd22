use crate::core::Pipeline;
use crate::utils::error::Result;
use std::path::PathBuf;

pub struct EstimatorEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EstimatorEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs the stages in strict sequence; the first failing stage
    /// halts the run and its error propagates to the caller.
    pub async fn run(&self) -> Result<PathBuf> {
        tracing::info!("Loading reviews...");
        let mut table = self.pipeline.load().await?;
        tracing::info!("Loaded {} records", table.len());

        tracing::info!("Requesting happiness estimation...");
        let scores = self.pipeline.estimate(&table).await?;
        tracing::info!("Parsed {} scores", scores.len());

        self.pipeline.merge(&mut table, &scores);

        tracing::info!("Writing annotated file...");
        let output_path = self.pipeline.persist(&table).await?;
        tracing::info!("Output saved to: {}", output_path.display());

        Ok(output_path)
    }
}
