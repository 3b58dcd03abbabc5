use churn_retention::core::ConfigProvider;
use churn_retention::utils::error::ErrorSeverity;
use churn_retention::utils::{logger, validation::Validate};
use churn_retention::{
    ChurnPipeline, CliConfig, HttpScorer, LocalFiles, PipelineOptions, Result, TomlConfig,
};
use clap::Parser;
use std::time::Duration;

async fn run(config: &CliConfig) -> Result<()> {
    let settings: Box<dyn ConfigProvider> = match &config.config {
        Some(path) => {
            tracing::info!("Loading settings from {}", path);
            let toml_config = TomlConfig::from_file(path)?;
            toml_config.validate()?;
            Box::new(toml_config)
        }
        None => {
            config.validate()?;
            Box::new(config.clone())
        }
    };

    let files = LocalFiles::default();
    let body = files.read_to_string(&config.input)?;

    let scorer = HttpScorer::new(
        settings.endpoint(),
        Duration::from_secs(settings.request_timeout_secs()),
    );
    tracing::info!("Scoring {} against {}", config.input, scorer.endpoint());

    let pipeline = ChurnPipeline::new(scorer, PipelineOptions::from_config(settings.as_ref()));
    let report = pipeline.run(&body, config.base64, None).await?;

    let json = serde_json::to_string_pretty(&report)?;
    match &config.output {
        Some(path) => {
            let written = files.write(path, json.as_bytes())?;
            tracing::info!("📁 Report saved to: {}", written.display());
        }
        None => println!("{}", json),
    }

    eprintln!("✅ {}", report.mensaje);
    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting churn-retention CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Scoring failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 3,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 4,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
