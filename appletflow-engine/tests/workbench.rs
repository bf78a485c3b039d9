//! End-to-end behaviour of a wired workbench with stubbed collaborators

use appletflow_client::{ClientError, HttpSummarizer, PriceFeed, Result as ClientResult};
use appletflow_core::domain::applet::AppletId;
use appletflow_core::domain::execution::ExecutionStatus;
use appletflow_core::dto::applet::RegisterApplet;
use appletflow_engine::{
    CatalogError, Config, ExecutionError, ExecutionOutcome, ExecutionService, ExecutionState,
    Workbench,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

struct StubFeed(HashMap<String, f64>);

#[async_trait]
impl PriceFeed for StubFeed {
    async fn usd_price(&self, coin_id: &str) -> ClientResult<Option<f64>> {
        Ok(self.0.get(coin_id).copied())
    }
}

struct UnreachableFeed;

#[async_trait]
impl PriceFeed for UnreachableFeed {
    async fn usd_price(&self, _coin_id: &str) -> ClientResult<Option<f64>> {
        Err(ClientError::status(503, "service unavailable"))
    }
}

fn bitcoin_feed() -> Arc<StubFeed> {
    Arc::new(StubFeed(HashMap::from([("bitcoin".to_string(), 50000.0)])))
}

/// Summarizer without a credential: always falls back locally
fn offline_summarizer() -> Arc<HttpSummarizer> {
    Arc::new(HttpSummarizer::new("http://127.0.0.1:9", None))
}

fn workbench(config: Config) -> Workbench {
    Workbench::with_collaborators(&config, offline_summarizer(), bitcoin_feed()).unwrap()
}

async fn run(workbench: &Workbench, ids: &[AppletId], input: &str) -> ExecutionOutcome {
    let pipeline = workbench.catalog.pipeline_from_ids(ids).await.unwrap();
    workbench.executor.run_pipeline(&pipeline, input).await.unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_sentiment_scores() {
    let workbench = workbench(Config::default());

    let positive = run(&workbench, &[1], "I love this, it is wonderful and great").await;
    let report = positive.result.sentiment.unwrap();
    assert!(report.score > 0);
    assert!(!report.words.is_empty());

    let negative = run(&workbench, &[1], "I hate this, it is terrible and awful").await;
    assert!(negative.result.sentiment.unwrap().score < 0);
}

#[tokio::test(start_paused = true)]
async fn test_summary_falls_back_to_first_two_sentences() {
    let workbench = workbench(Config::default());

    let outcome = run(
        &workbench,
        &[5],
        "The market rallied today. Investors cheered the news. Analysts remain cautious.",
    )
    .await;

    assert_eq!(
        outcome.result.summary.as_deref(),
        Some("The market rallied today. Investors cheered the news.")
    );
    assert!(outcome.result.sentiment.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_price_oracle_quotes() {
    let workbench = workbench(Config::default());

    let known = run(&workbench, &[6], "bitcoin").await;
    assert_eq!(known.result.crypto_price.unwrap().display(), "$50000");

    let unknown = run(&workbench, &[6], "notacoin").await;
    let price = unknown.result.crypto_price.unwrap();
    assert!(price.is_error());
    assert!(price.display().contains("Unknown coin identifier"));
}

#[tokio::test(start_paused = true)]
async fn test_price_oracle_failure_does_not_fail_run() {
    let config = Config::default();
    let workbench =
        Workbench::with_collaborators(&config, offline_summarizer(), Arc::new(UnreachableFeed))
            .unwrap();

    let outcome = run(&workbench, &[6], "").await;

    let price = outcome.result.crypto_price.unwrap();
    assert_eq!(price.coin_id(), "bitcoin");
    assert!(price.display().starts_with("Price lookup failed"));
    assert_eq!(outcome.entry.status, ExecutionStatus::Success);
}

#[tokio::test(start_paused = true)]
async fn test_every_run_appends_one_entry_with_fresh_id() {
    let workbench = workbench(Config::default());
    let mut seen: Vec<u64> = workbench
        .history
        .list()
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();

    for ids in [vec![1, 1, 5], vec![6, 2, 6], vec![4]] {
        let before = workbench.history.count().await.unwrap();
        let outcome = run(&workbench, &ids, "bitcoin").await;

        assert_eq!(workbench.history.count().await.unwrap(), before + 1);
        assert_eq!(outcome.entry.applet_ids, ids);
        assert!(seen.iter().all(|&id| outcome.entry.id > id));
        seen.push(outcome.entry.id);
    }
}

#[tokio::test(start_paused = true)]
async fn test_history_is_newest_first() {
    let workbench = workbench(Config::default());
    run(&workbench, &[1], "good").await;
    run(&workbench, &[5], "Fine.").await;

    let entries = workbench.history.list().await.unwrap();
    assert_eq!(entries.len(), 4);
    assert!(entries.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test(start_paused = true)]
async fn test_total_price_recorded() {
    let workbench = workbench(Config::default());

    let outcome = run(&workbench, &[2, 2, 4], "x").await;
    assert_eq!(outcome.entry.total_price.to_string(), "0.05");
}

#[tokio::test(start_paused = true)]
async fn test_state_transitions() {
    let workbench = workbench(Config::default());
    let progress = workbench.executor.subscribe();
    assert_eq!(*progress.borrow(), ExecutionState::Idle);

    let outcome = run(&workbench, &[1], "great").await;
    assert_eq!(*progress.borrow(), ExecutionState::Succeeded(outcome.result));
}

#[tokio::test(start_paused = true)]
async fn test_strict_mode_logs_nothing() {
    let workbench = workbench(Config::default().with_strict_schema(true));
    let pipeline = workbench.catalog.pipeline_from_ids(&[2, 3]).await.unwrap();

    let err = workbench
        .executor
        .run_pipeline(&pipeline, "x")
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::SchemaMismatch(_)));
    assert_eq!(workbench.history.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_registration_grows_catalog() {
    let workbench = workbench(Config::default().with_owner_address("0xAlice"));

    let applet = workbench
        .catalog
        .register_applet(RegisterApplet {
            name: "Uploader".to_string(),
            description: "Stores files".to_string(),
            price: "0.5".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(applet.id, 7);
    assert_eq!(applet.owner, "0xAlice");
    assert_eq!(workbench.catalog.applet_count().await.unwrap(), 7);

    let rejected = workbench
        .catalog
        .register_applet(RegisterApplet {
            name: "Nameless price".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(rejected, Err(CatalogError::Validation(_))));
    assert_eq!(workbench.catalog.applet_count().await.unwrap(), 7);
}

#[tokio::test(start_paused = true)]
async fn test_state_survives_restart() {
    let tmp = TempDir::new().unwrap();
    let config = Config::default().with_state_path(tmp.path().join("state.json"));

    let first = workbench(config.clone());
    first
        .catalog
        .register_applet(RegisterApplet {
            name: "Uploader".to_string(),
            price: "0.5".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let outcome = run(&first, &[7, 1], "good").await;
    drop(first);

    let second = workbench(config.with_seed_demo_data(false));
    assert_eq!(second.catalog.applet_count().await.unwrap(), 7);
    let entry = second.history.find(outcome.entry.id).await.unwrap().unwrap();
    assert_eq!(entry, outcome.entry);
}
