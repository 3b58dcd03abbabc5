use crate::core::inference::{decode_predictions, encode_chunk};
use crate::core::{ChurnScorer, FeatureVector};
use crate::utils::error::{ChurnError, Result};
use async_trait::async_trait;
use aws_sdk_sagemakerruntime::primitives::Blob;
use aws_sdk_sagemakerruntime::Client as SageMakerClient;

/// Scores chunks through the SageMaker runtime `InvokeEndpoint` API.
#[derive(Debug, Clone)]
pub struct SageMakerScorer {
    client: SageMakerClient,
    endpoint_name: String,
}

impl SageMakerScorer {
    pub fn new(client: SageMakerClient, endpoint_name: String) -> Self {
        Self {
            client,
            endpoint_name,
        }
    }
}

#[async_trait]
impl ChurnScorer for SageMakerScorer {
    async fn score_chunk(&self, chunk: &[FeatureVector]) -> Result<Vec<f64>> {
        let payload = encode_chunk(chunk);
        tracing::debug!(
            "InvokeEndpoint {} ({} rows, {} bytes)",
            self.endpoint_name,
            chunk.len(),
            payload.len()
        );

        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(&self.endpoint_name)
            .content_type("text/csv")
            .body(Blob::new(payload.into_bytes()))
            .send()
            .await
            .map_err(|e| {
                ChurnError::inference(format!(
                    "InvokeEndpoint on {} failed: {}",
                    self.endpoint_name,
                    aws_sdk_sagemakerruntime::error::DisplayErrorContext(&e)
                ))
            })?;

        let body = output
            .body()
            .ok_or_else(|| ChurnError::inference("InvokeEndpoint returned an empty body"))?;
        let text = std::str::from_utf8(body.as_ref())
            .map_err(|e| ChurnError::inference(format!("response is not UTF-8: {}", e)))?;

        decode_predictions(text)
    }
}
