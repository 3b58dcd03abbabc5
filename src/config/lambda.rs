use crate::config::{
    validate_scoring_settings, DEFAULT_BATCH_SIZE, DEFAULT_ENDPOINT_NAME,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS,
    TARGET_CHURN_PROBABILITY_CUTOFF,
};
use crate::core::ConfigProvider;
use crate::utils::error::{ChurnError, Result};
use crate::utils::validation::Validate;
use std::env;
use std::str::FromStr;

/// Deploy-time settings of the Lambda function, read from its environment.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaConfig {
    pub endpoint_name: String,
    pub risk_cutoff: f64,
    pub batch_size: usize,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            endpoint_name: lookup("ENDPOINT_NAME")
                .unwrap_or_else(|| DEFAULT_ENDPOINT_NAME.to_string()),
            risk_cutoff: parse_var(&lookup, "RISK_CUTOFF", TARGET_CHURN_PROBABILITY_CUTOFF)?,
            batch_size: parse_var(&lookup, "BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
            retry_attempts: parse_var(&lookup, "RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS)?,
            retry_delay_ms: parse_var(&lookup, "RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS)?,
            request_timeout_secs: parse_var(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ChurnError::InvalidConfigValueError {
                field: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

impl ConfigProvider for LambdaConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint_name
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
        self.request_timeout_secs
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::validate_endpoint_name;

        validate_endpoint_name("ENDPOINT_NAME", &self.endpoint_name)?;
        validate_scoring_settings(self)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
