use crate::core::batcher::{batch_rows, DEFAULT_BATCH_SIZE};
use crate::domain::model::FeatureVector;
use crate::domain::schema::FEATURE_COUNT;
use crate::domain::ports::ChurnScorer;
use crate::utils::error::{ChurnError, Result};
use std::fmt::Write as _;
use std::time::Duration;
use tokio::time::Instant;

/// Serializes a chunk the way the model container expects `text/csv`: no header, no index.
pub fn encode_chunk(chunk: &[FeatureVector]) -> String {
    let mut payload = String::with_capacity(chunk.len() * FEATURE_COUNT * 4);
    for row in chunk {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                payload.push(',');
            }
            let _ = write!(payload, "{}", value);
        }
        payload.push('\n');
    }
    payload
}

/// Parses one probability per line, ignoring blank lines.
pub fn decode_predictions(body: &str) -> Result<Vec<f64>> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse::<f64>().map_err(|_| {
                ChurnError::inference(format!("endpoint returned a non-numeric prediction: {:?}", line))
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay: Duration::from_millis(250),
        }
    }
}

/// Drives a [`ChurnScorer`] over a whole table, chunk by chunk.
pub struct InferenceClient<S: ChurnScorer> {
    scorer: S,
    batch_size: usize,
    retry: RetryPolicy,
}

impl<S: ChurnScorer> InferenceClient<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            batch_size: DEFAULT_BATCH_SIZE,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns exactly one probability per input vector, in input order.
    pub async fn score_all(
        &self,
        vectors: &[FeatureVector],
        deadline: Option<Instant>,
    ) -> Result<Vec<f64>> {
        let chunks = batch_rows(vectors, self.batch_size);
        tracing::info!(
            "Scoring {} rows in {} chunk(s) of up to {}",
            vectors.len(),
            chunks.len(),
            self.batch_size
        );

        let mut probabilities = Vec::with_capacity(vectors.len());
        for (index, chunk) in chunks.iter().enumerate() {
            if chunk.is_empty() {
                continue;
            }
            let scores = self.score_with_retry(index, chunk, deadline).await?;
            probabilities.extend(scores);
        }

        if probabilities.len() != vectors.len() {
            return Err(ChurnError::inference(format!(
                "collected {} predictions for {} rows",
                probabilities.len(),
                vectors.len()
            )));
        }
        Ok(probabilities)
    }

    async fn score_with_retry(
        &self,
        index: usize,
        chunk: &[FeatureVector],
        deadline: Option<Instant>,
    ) -> Result<Vec<f64>> {
        let mut attempt = 0;
        loop {
            match self.attempt(chunk, deadline).await {
                Ok(scores) => {
                    tracing::debug!("Chunk {} scored ({} rows)", index, scores.len());
                    return Ok(scores);
                }
                Err(e @ ChurnError::TimeoutError { .. }) => return Err(e),
                Err(e) if attempt < self.retry.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Chunk {} failed (attempt {}/{}): {}",
                        index,
                        attempt,
                        self.retry.max_retries + 1,
                        e
                    );
                    let backoff = self.retry.delay * attempt;
                    if let Some(deadline) = deadline {
                        if Instant::now() + backoff >= deadline {
                            return Err(ChurnError::TimeoutError {
                                message: format!("no time left to retry chunk {}", index),
                            });
                        }
                    }
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => {
                    tracing::error!("Chunk {} failed permanently: {}", index, e);
                    return Err(e);
                }
            }
        }
    }

    async fn attempt(&self, chunk: &[FeatureVector], deadline: Option<Instant>) -> Result<Vec<f64>> {
        let scores = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, self.scorer.score_chunk(chunk))
                .await
                .map_err(|_| ChurnError::TimeoutError {
                    message: format!("inference call for {} rows did not complete", chunk.len()),
                })??,
            None => self.scorer.score_chunk(chunk).await?,
        };

        if scores.len() != chunk.len() {
            return Err(ChurnError::inference(format!(
                "endpoint returned {} predictions for {} rows",
                scores.len(),
                chunk.len()
            )));
        }
        if let Some(bad) = scores.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(ChurnError::inference(format!(
                "prediction {} is not a probability",
                bad
            )));
        }
        Ok(scores)
    }
}
