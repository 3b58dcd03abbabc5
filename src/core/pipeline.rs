use crate::core::classifier::RiskClassifier;
use crate::core::decoder::decode_payload;
use crate::core::inference::{InferenceClient, RetryPolicy};
use crate::core::parser::TableParser;
use crate::core::recommendation::{recommend, RetentionAction};
use crate::core::report::ReportBuilder;
use crate::core::{ChurnScorer, ConfigProvider};
use crate::domain::model::{FeatureVector, Report, ScoredRow};
use crate::domain::schema::ColumnSchema;
use crate::utils::error::Result;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub schema: ColumnSchema,
    pub risk_cutoff: f64,
    pub batch_size: usize,
    pub retry: RetryPolicy,
}

impl PipelineOptions {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            schema: ColumnSchema::churn(),
            risk_cutoff: config.risk_cutoff(),
            batch_size: config.batch_size(),
            retry: RetryPolicy {
                max_retries: config.retry_attempts(),
                delay: Duration::from_millis(config.retry_delay_ms()),
            },
        }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            schema: ColumnSchema::churn(),
            risk_cutoff: crate::config::TARGET_CHURN_PROBABILITY_CUTOFF,
            batch_size: crate::config::DEFAULT_BATCH_SIZE,
            retry: RetryPolicy::default(),
        }
    }
}

/// Decode, parse, score, classify, recommend and report for one request.
pub struct ChurnPipeline<S: ChurnScorer> {
    schema: ColumnSchema,
    inference: InferenceClient<S>,
    classifier: RiskClassifier,
    reports: ReportBuilder,
}

impl<S: ChurnScorer> ChurnPipeline<S> {
    pub fn new(scorer: S, options: PipelineOptions) -> Self {
        Self {
            schema: options.schema,
            inference: InferenceClient::new(scorer)
                .with_batch_size(options.batch_size)
                .with_retry(options.retry),
            classifier: RiskClassifier::new(options.risk_cutoff),
            reports: ReportBuilder::new(options.risk_cutoff),
        }
    }

    pub async fn run(
        &self,
        body: &str,
        is_base64_encoded: bool,
        deadline: Option<Instant>,
    ) -> Result<Report> {
        let text = decode_payload(body, is_base64_encoded)?;
        tracing::debug!("Decoded payload: {} bytes", text.len());

        let rows = TableParser::new(&self.schema).parse(&text)?;
        tracing::info!("📥 Parsed {} rows", rows.len());

        let vectors: Vec<FeatureVector> = rows.iter().map(|row| row.to_features()).collect();
        let probabilities = self.inference.score_all(&vectors, deadline).await?;

        let scored = self.classifier.classify(rows, probabilities)?;
        let flagged: Vec<(&ScoredRow, RetentionAction)> = self
            .classifier
            .high_risk(&scored)
            .into_iter()
            .map(|s| (s, recommend(&s.row)))
            .collect();
        tracing::info!(
            "🎯 {} of {} rows above cutoff {}",
            flagged.len(),
            scored.len(),
            self.classifier.cutoff()
        );

        Ok(self.reports.build(&scored, &flagged, chrono::Utc::now()))
    }
}
