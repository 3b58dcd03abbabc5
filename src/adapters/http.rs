use crate::core::inference::{decode_predictions, encode_chunk};
use crate::core::{ChurnScorer, FeatureVector};
use crate::utils::error::{ChurnError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Scores chunks against any endpoint speaking the SageMaker `/invocations` CSV contract.
pub struct HttpScorer {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpScorer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChurnScorer for HttpScorer {
    async fn score_chunk(&self, chunk: &[FeatureVector]) -> Result<Vec<f64>> {
        let payload = encode_chunk(chunk);
        tracing::debug!(
            "POST {} ({} rows, {} bytes)",
            self.endpoint,
            chunk.len(),
            payload.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/csv")
            .header("Accept", "text/csv")
            .timeout(self.timeout)
            .body(payload)
            .send()
            .await
            .map_err(|e| ChurnError::inference(format!("request to {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChurnError::inference(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(ChurnError::inference(format!(
                "endpoint answered {}: {}",
                status,
                body.trim()
            )));
        }

        decode_predictions(&body)
    }
}
