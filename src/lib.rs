pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::OpenAiClient;
pub use config::CliConfig;
pub use crate::core::{engine::EstimatorEngine, pipeline::ReviewPipeline};
pub use utils::error::{EstimatorError, Result};
