//! Workbench backed by the registry and logger contracts, served by wiremock

use appletflow_client::{HttpSummarizer, PriceFeed, Result as ClientResult};
use appletflow_core::domain::execution::ExecutionStatus;
use appletflow_engine::{Config, ExecutionError, ExecutionService, Workbench};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct NoPrices;

#[async_trait]
impl PriceFeed for NoPrices {
    async fn usd_price(&self, _coin_id: &str) -> ClientResult<Option<f64>> {
        Ok(None)
    }
}

fn workbench(server: &MockServer) -> Workbench {
    let config = Config::default()
        .with_contracts(server.uri(), "registry", "logger")
        .with_owner_address("0xAlice")
        .with_settlement_delay(Duration::ZERO);
    Workbench::with_collaborators(
        &config,
        Arc::new(HttpSummarizer::new("http://127.0.0.1:9", None)),
        Arc::new(NoPrices),
    )
    .unwrap()
}

fn sentiment_applet() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "name": "Sentiment Analysis",
        "description": "Analyzes text sentiment",
        "price": 50_000_000_000_000_000u64,
        "owner": "0x123...",
        "input_schema": "Text",
        "output_schema": "JSON",
        "is_active": true
    })
}

#[tokio::test]
async fn test_catalog_reads_from_registry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contracts/registry/query"))
        .and(body_partial_json(serde_json::json!({ "method": "get_applets" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([sentiment_applet()])),
        )
        .mount(&server)
        .await;

    let applets = workbench(&server).catalog.list_applets().await.unwrap();

    assert_eq!(applets.len(), 1);
    assert_eq!(applets[0].price.to_string(), "0.05");
}

#[tokio::test]
async fn test_registration_uses_registry_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contracts/registry/execute"))
        .and(body_partial_json(serde_json::json!({
            "method": "register_applet",
            "args": { "name": "Uploader", "price": 500_000_000_000_000_000u64 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(42)))
        .expect(1)
        .mount(&server)
        .await;

    let applet = workbench(&server)
        .catalog
        .register_applet(appletflow_core::dto::applet::RegisterApplet {
            name: "Uploader".to_string(),
            price: "0.5".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(applet.id, 42);
    assert_eq!(applet.owner, "0xAlice");
}

#[tokio::test]
async fn test_execution_is_logged_on_chain() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contracts/registry/query"))
        .and(body_partial_json(serde_json::json!({ "method": "get_applet_by_id" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sentiment_applet()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/contracts/logger/execute"))
        .and(body_partial_json(serde_json::json!({
            "method": "log_execution",
            "args": { "applet_ids": [1, 1], "total_price": 100_000_000_000_000_000u64 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(9)))
        .expect(1)
        .mount(&server)
        .await;

    let workbench = workbench(&server);
    let pipeline = workbench.catalog.pipeline_from_ids(&[1, 1]).await.unwrap();
    let outcome = workbench
        .executor
        .run_pipeline(&pipeline, "good")
        .await
        .unwrap();

    assert_eq!(outcome.entry.id, 9);
    assert_eq!(outcome.entry.user.as_deref(), Some("0xAlice"));
    assert_eq!(outcome.entry.result_hash.as_ref().map(String::len), Some(64));
}

#[tokio::test]
async fn test_gateway_failure_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contracts/logger/query"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = workbench(&server).history.list().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_timed_out_run_reads_back_as_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contracts/registry/query"))
        .and(body_partial_json(serde_json::json!({ "method": "get_applet_by_id" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sentiment_applet()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/contracts/logger/execute"))
        .and(body_partial_json(serde_json::json!({
            "method": "log_execution",
            "args": { "applet_ids": [1], "result_hash": "" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(4)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/contracts/logger/query"))
        .and(body_partial_json(serde_json::json!({
            "method": "get_executions_by_user",
            "args": { "user": "0xAlice" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 4,
            "user": "0xAlice",
            "applet_ids": [1],
            "total_price": 50_000_000_000_000_000u64,
            "result_hash": "",
            "timestamp": 1_700_000_000u64
        }])))
        .mount(&server)
        .await;

    let config = Config::default()
        .with_contracts(server.uri(), "registry", "logger")
        .with_owner_address("0xAlice")
        .with_settlement_delay(Duration::from_millis(500))
        .with_execution_timeout(Duration::from_millis(20));
    let workbench = Workbench::with_collaborators(
        &config,
        Arc::new(HttpSummarizer::new("http://127.0.0.1:9", None)),
        Arc::new(NoPrices),
    )
    .unwrap();

    let pipeline = workbench.catalog.pipeline_from_ids(&[1]).await.unwrap();
    let err = workbench
        .executor
        .run_pipeline(&pipeline, "good")
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutionError::TimedOut(_)));

    let history = workbench.history.list().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, ExecutionStatus::Failed);
    assert!(history[0].result_hash.is_none());
}
