use clap::Parser;
use review_estimator::utils::{logger, validation::Validate};
use review_estimator::{CliConfig, EstimatorEngine, OpenAiClient, ReviewPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting review-estimator CLI");

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    // Validated above; the key is injected here instead of being read
    // from the environment inside the client.
    let api_key = config.api_key.clone().unwrap_or_default();
    let client = OpenAiClient::new(config.api_base.clone(), api_key, config.model.clone());

    let mut pipeline = ReviewPipeline::new(client, config.input.clone());
    if let Some(prompt) = config.prompt.clone() {
        pipeline = pipeline.with_prompt(prompt);
    }

    let engine = EstimatorEngine::new(pipeline);
    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Estimation completed successfully!");
            println!("✅ Estimation completed successfully!");
            println!("📁 Output saved to: {}", output_path.display());
        }
        Err(e) => {
            tracing::error!("❌ Estimation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
