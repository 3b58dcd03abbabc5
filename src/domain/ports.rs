use crate::domain::model::FeatureVector;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote churn model: one probability per submitted row, in submission order.
#[async_trait]
pub trait ChurnScorer: Send + Sync {
    async fn score_chunk(&self, chunk: &[FeatureVector]) -> Result<Vec<f64>>;
}

#[async_trait]
impl<T: ChurnScorer + ?Sized> ChurnScorer for std::sync::Arc<T> {
    async fn score_chunk(&self, chunk: &[FeatureVector]) -> Result<Vec<f64>> {
        (**self).score_chunk(chunk).await
    }
}

pub trait ConfigProvider: Send + Sync {
    /// Invocation URL or SageMaker endpoint name, depending on the adapter.
    fn endpoint(&self) -> &str;
    fn risk_cutoff(&self) -> f64;
    fn batch_size(&self) -> usize;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_ms(&self) -> u64;
    fn request_timeout_secs(&self) -> u64;
}
