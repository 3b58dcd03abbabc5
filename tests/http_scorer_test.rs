use anyhow::Result;
use churn_retention::core::inference::RetryPolicy;
use churn_retention::{handle_request, ChurnPipeline, HttpRequest, HttpScorer, PipelineOptions};
use httpmock::prelude::*;
use std::time::Duration;

fn customer(account_length: u32, custserv_calls: u32) -> String {
    let mut fields = vec!["0".to_string(); 100];
    fields[1] = account_length.to_string();
    fields[3] = "120".to_string();
    fields[11] = custserv_calls.to_string();
    fields.join(",")
}

fn options(batch_size: usize) -> PipelineOptions {
    PipelineOptions {
        batch_size,
        retry: RetryPolicy::none(),
        ..PipelineOptions::default()
    }
}

#[tokio::test]
async fn test_chunks_are_posted_and_predictions_realigned() -> Result<()> {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(POST)
            .path("/invocations")
            .header("Content-Type", "text/csv")
            .body_contains("901,");
        then.status(200).body("0.1\n0.8\n");
    });
    let second = server.mock(|when, then| {
        when.method(POST)
            .path("/invocations")
            .body_contains("903,");
        then.status(200).body("0.7\n");
    });

    let scorer = HttpScorer::new(server.url("/invocations"), Duration::from_secs(5));
    let pipeline = ChurnPipeline::new(scorer, options(2));
    let body = [customer(901, 0), customer(902, 4), customer(903, 1)].join("\n");

    let response = handle_request(
        &pipeline,
        HttpRequest {
            body: Some(body),
            is_base64_encoded: false,
        },
        None,
    )
    .await?;

    first.assert();
    second.assert();
    assert_eq!(response.status_code, 200);

    let report: serde_json::Value = serde_json::from_str(&response.body)?;
    let entries = report["clientes_en_riesgo"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["Fila_CSV_Original"], 2);
    assert_eq!(entries[0]["Account Length"], 902.0);
    assert_eq!(
        entries[0]["Accion_Recomendada"],
        "VIP treatment: assign personal account manager + priority support"
    );
    assert_eq!(entries[1]["Fila_CSV_Original"], 3);
    assert_eq!(entries[1]["Probabilidad_Fuga"], 0.7);
    Ok(())
}

#[tokio::test]
async fn test_endpoint_failure_is_a_server_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/invocations");
        then.status(503).body("model container unavailable");
    });

    let scorer = HttpScorer::new(server.url("/invocations"), Duration::from_secs(5));
    let pipeline = ChurnPipeline::new(scorer, options(500));

    let result = handle_request(
        &pipeline,
        HttpRequest {
            body: Some(customer(10, 0)),
            is_base64_encoded: false,
        },
        None,
    )
    .await;

    mock.assert();
    let err = result.expect_err("endpoint failure must not produce a response");
    assert!(!err.is_client_error());
    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("503"));
}
