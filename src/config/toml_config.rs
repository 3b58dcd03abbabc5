use crate::config::{
    validate_scoring_settings, DEFAULT_BATCH_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, TARGET_CHURN_PROBABILITY_CUTOFF,
};
use crate::core::ConfigProvider;
use crate::utils::error::{ChurnError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub risk_cutoff: Option<f64>,
    pub batch_size: Option<usize>,
}

impl TomlConfig {
    /// Loads a scoring configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ChurnError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ChurnError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ChurnError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint.url
    }

    fn risk_cutoff(&self) -> f64 {
        self.scoring
            .risk_cutoff
            .unwrap_or(TARGET_CHURN_PROBABILITY_CUTOFF)
    }

    fn batch_size(&self) -> usize {
        self.scoring.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }

    fn retry_attempts(&self) -> u32 {
        self.endpoint.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS)
    }

    fn retry_delay_ms(&self) -> u64 {
        self.endpoint.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)
    }

    fn request_timeout_secs(&self) -> u64 {
        self.endpoint
            .timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_url("endpoint.url", &self.endpoint.url)?;
        validate_scoring_settings(self)
    }
}
