#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub use crate::core::batcher::DEFAULT_BATCH_SIZE;
pub use crate::core::classifier::TARGET_CHURN_PROBABILITY_CUTOFF;

/// Production SageMaker endpoint serving the churn model.
pub const DEFAULT_ENDPOINT_NAME: &str = "churn-xgboost-prod-v1";
pub const DEFAULT_INVOCATIONS_URL: &str = "http://localhost:8080/invocations";
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 2;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 250;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Largest chunk the endpoint's 6 MB payload limit comfortably fits.
pub const MAX_BATCH_SIZE: usize = 5000;
pub const MAX_RETRY_ATTEMPTS: u32 = 10;

/// Bounds shared by every configuration source.
pub fn validate_scoring_settings<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_range("risk_cutoff", config.risk_cutoff(), 0.0, 1.0)?;
    validate_range("batch_size", config.batch_size(), 1, MAX_BATCH_SIZE)?;
    validate_range("retry_attempts", config.retry_attempts(), 0, MAX_RETRY_ATTEMPTS)?;
    validate_positive_number(
        "request_timeout_secs",
        config.request_timeout_secs() as usize,
        1,
    )?;
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "churn-retention")]
#[command(about = "Score a churn feature CSV and print the retention report")]
pub struct CliConfig {
    #[arg(long, help = "Headerless CSV with 100 fields per line")]
    pub input: String,

    #[arg(long, default_value = DEFAULT_INVOCATIONS_URL)]
    pub endpoint: String,

    #[arg(long, default_value_t = TARGET_CHURN_PROBABILITY_CUTOFF)]
    pub risk_cutoff: f64,

    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    #[arg(long, default_value_t = DEFAULT_RETRY_ATTEMPTS)]
    pub retry_attempts: u32,

    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_MS)]
    pub retry_delay_ms: u64,

    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, help = "Input file is base64 encoded")]
    pub base64: bool,

    #[arg(long, help = "Write the JSON report here instead of stdout")]
    pub output: Option<String>,

    #[arg(long, help = "TOML file overriding the endpoint and scoring settings")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn risk_cutoff(&self) -> f64 {
        self.risk_cutoff
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_non_empty_string("input", &self.input)?;
        validate_url("endpoint", &self.endpoint)?;
        validate_scoring_settings(self)?;
        Ok(())
    }
}
