use crate::adapters::openai::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "review-estimator")]
#[command(about = "Scores customer review happiness via a chat completion API")]
pub struct CliConfig {
    /// CSV file of reviews; needs 'email' and 'review text' columns
    pub input: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "Override the estimation prompt template")]
    pub prompt: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_csv_path("input", &self.input)?;
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_non_empty_string("model", &self.model)?;
        let api_key = validation::validate_required_field("api_key", &self.api_key)?;
        validation::validate_non_empty_string("api_key", api_key)?;
        Ok(())
    }
}
