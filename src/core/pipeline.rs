use crate::core::{CompletionClient, Pipeline, Record, ReviewTable, ScoreTable};
use crate::domain::model::{EMAIL_COLUMN, RATE_COLUMN, REVIEW_COLUMN};
use crate::utils::error::{EstimatorError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROMPT: &str = "subject: estimate 10 reviews by their happiness level from 1 to 10,\noutput format: no numeration, email - happiness level, higher estimation goes first\n";

pub struct ReviewPipeline<C: CompletionClient> {
    client: C,
    input_path: PathBuf,
    prompt: String,
}

impl<C: CompletionClient> ReviewPipeline<C> {
    pub fn new(client: C, input_path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            input_path: input_path.into(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Template followed by a JSON-encoded list of [email, review text]
    /// pairs, one pair per record in file order.
    fn build_prompt(&self, table: &ReviewTable) -> Result<String> {
        if table.is_empty() {
            return Err(EstimatorError::NoData);
        }

        let pairs: Vec<[&str; 2]> = table
            .records
            .iter()
            .map(|record| {
                [
                    record.email(),
                    record.field(REVIEW_COLUMN).unwrap_or_default(),
                ]
            })
            .collect();

        Ok(format!("{}{}", self.prompt, serde_json::to_string(&pairs)?))
    }

    /// Expects one `<email> <score>` line per review, optionally
    /// bullet-prefixed. Anything else halts the run before the output
    /// file is touched.
    fn parse_scores(content: &str) -> Result<ScoreTable> {
        let mut scores = ScoreTable::new();

        for line in content.replace("- ", "").trim().lines() {
            let mut tokens = line.split_whitespace();
            let (email, value) = match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(email), Some(value), None) => (email, value),
                _ => {
                    return Err(EstimatorError::MalformedLine {
                        line: line.to_string(),
                    })
                }
            };

            let score: i64 = value
                .parse()
                .map_err(|_| EstimatorError::MalformedLine {
                    line: line.to_string(),
                })?;

            tracing::info!("{} {}", email, score);
            scores.insert(email.to_string(), score);
        }

        Ok(scores)
    }

    fn output_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        input.with_file_name(format!("{}_analyzed.csv", stem))
    }
}

#[async_trait::async_trait]
impl<C: CompletionClient> Pipeline for ReviewPipeline<C> {
    async fn load(&self) -> Result<ReviewTable> {
        tracing::debug!("Reading reviews from: {}", self.input_path.display());
        let mut reader = csv::Reader::from_path(&self.input_path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        for required in [EMAIL_COLUMN, REVIEW_COLUMN] {
            if !headers.iter().any(|h| h == required) {
                return Err(EstimatorError::MissingColumn {
                    column: required.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let fields: HashMap<String, String> = headers
                .iter()
                .cloned()
                .zip(row.iter().map(str::to_string))
                .collect();
            records.push(Record::new(fields));
        }

        if records.is_empty() {
            tracing::warn!("File is empty.");
        }

        Ok(ReviewTable { headers, records })
    }

    async fn estimate(&self, table: &ReviewTable) -> Result<ScoreTable> {
        let prompt = self.build_prompt(table)?;
        tracing::debug!("Prompt size: {} bytes", prompt.len());

        let content = self.client.complete(&prompt).await?;
        Self::parse_scores(&content)
    }

    fn merge(&self, table: &mut ReviewTable, scores: &ScoreTable) {
        for record in &mut table.records {
            record.rate = scores.get(record.email()).unwrap_or(0);
        }
        table.records.sort_unstable_by(|a, b| b.rate.cmp(&a.rate));
    }

    async fn persist(&self, table: &ReviewTable) -> Result<PathBuf> {
        if table.is_empty() {
            return Err(EstimatorError::NoData);
        }

        let output_path = Self::output_path(&self.input_path);
        tracing::debug!("Writing annotated CSV to: {}", output_path.display());
        let mut writer = csv::Writer::from_path(&output_path)?;

        let mut header_row: Vec<&str> = table.headers.iter().map(String::as_str).collect();
        header_row.push(RATE_COLUMN);
        writer.write_record(&header_row)?;

        for record in &table.records {
            let mut row: Vec<String> = table
                .headers
                .iter()
                .map(|h| record.field(h).unwrap_or_default().to_string())
                .collect();
            row.push(record.rate.to_string());
            writer.write_record(&row)?;
        }
        writer.flush()?;

        Ok(output_path)
    }
}
