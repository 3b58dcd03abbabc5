use aws_config::BehaviorVersion;
use aws_sdk_sagemakerruntime::Client as SageMakerClient;
use churn_retention::utils::{logger, validation::Validate};
use churn_retention::{
    handle_request, ChurnPipeline, HttpRequest, HttpResponse, LambdaConfig, PipelineOptions,
    SageMakerScorer,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::Instant;

/// Time kept back from the invocation deadline so a timeout is reported instead of killed.
const DEADLINE_MARGIN: Duration = Duration::from_millis(500);

/// Converts the runtime's epoch-millisecond deadline into a tokio instant.
fn invocation_deadline(deadline_ms: u64) -> Option<Instant> {
    if deadline_ms == 0 {
        return None;
    }
    let now_ms = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_millis() as u64;
    let remaining = Duration::from_millis(deadline_ms.saturating_sub(now_ms));
    Some(Instant::now() + remaining.saturating_sub(DEADLINE_MARGIN))
}

async fn function_handler(
    pipeline: &ChurnPipeline<SageMakerScorer>,
    event: LambdaEvent<HttpRequest>,
) -> Result<HttpResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Scoring request received");

    let deadline = invocation_deadline(event.context.deadline);
    let response = handle_request(pipeline, event.payload, deadline)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    lambda_config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let scorer = SageMakerScorer::new(
        SageMakerClient::new(&sdk_config),
        lambda_config.endpoint_name.clone(),
    );
    let pipeline = ChurnPipeline::new(scorer, PipelineOptions::from_config(&lambda_config));
    tracing::info!(
        endpoint = %lambda_config.endpoint_name,
        cutoff = lambda_config.risk_cutoff,
        batch_size = lambda_config.batch_size,
        "Churn scoring function initialized"
    );

    let pipeline = &pipeline;
    run(service_fn(move |event: LambdaEvent<HttpRequest>| async move {
        function_handler(pipeline, event).await
    }))
    .await
}
