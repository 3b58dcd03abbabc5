use crate::core::pipeline::ChurnPipeline;
use crate::core::ChurnScorer;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::time::Instant;

/// API Gateway proxy / Function URL request, reduced to what scoring needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }
}

/// Runs one request. Malformed input becomes a 400 response; any other failure is returned
/// as `Err` so the host reports it as a server error instead of a partial report.
pub async fn handle_request<S: ChurnScorer>(
    pipeline: &ChurnPipeline<S>,
    request: HttpRequest,
    deadline: Option<Instant>,
) -> Result<HttpResponse> {
    let body = request.body.unwrap_or_default();

    match pipeline.run(&body, request.is_base64_encoded, deadline).await {
        Ok(report) => {
            tracing::info!(
                "✅ Report ready: {} rows, {} at risk",
                report.rows_processed,
                report.total_clientes_riesgo
            );
            Ok(HttpResponse::json(200, serde_json::to_string(&report)?))
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!("Rejected request: {}", e);
            let body = serde_json::json!({ "error": e.to_string() });
            Ok(HttpResponse::json(e.status_code(), body.to_string()))
        }
        Err(e) => {
            tracing::error!(
                "❌ Scoring failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            Err(e)
        }
    }
}
