use crate::domain::model::{ReviewTable, ScoreTable};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Narrow seam to the external completion service: submit a prompt,
/// receive the raw response text. Lets tests substitute a double for
/// the real API.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn load(&self) -> Result<ReviewTable>;
    async fn estimate(&self, table: &ReviewTable) -> Result<ScoreTable>;
    fn merge(&self, table: &mut ReviewTable, scores: &ScoreTable);
    async fn persist(&self, table: &ReviewTable) -> Result<PathBuf>;
}
