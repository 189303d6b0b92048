//! Chart endpoint and service route tests.

mod common;

use common::fixtures;
use common::harness::TestHarness;
use matdb_rest::ServerConfig;
use serde_json::{Value, json};

#[tokio::test]
async fn test_root_welcome() {
    let harness = TestHarness::new();

    let response = harness.server.get("/").await;

    response.assert_status_ok();
    response.assert_json(&json!({"message": "Welcome to the Materials Database API"}));
}

#[tokio::test]
async fn test_health_reports_backend() {
    let harness = TestHarness::new();

    let body: Value = harness.server.get("/health").await.json();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "memory");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_charts_shape() {
    let harness = TestHarness::new();
    harness.seed(fixtures::diamond());
    harness.seed(fixtures::graphite());
    harness.seed_many(10);

    let response = harness.server.get("/api/charts").await;
    response.assert_status_ok();
    let body: Value = response.json();

    let crystal = &body["crystal_pie"];
    assert_eq!(crystal["layout"]["title"]["text"], "Distribution of Crystal Systems");
    assert_eq!(crystal["data"][0]["type"], "pie");
    assert_eq!(crystal["data"][0]["labels"], json!(["cubic", "hexagonal"]));
    assert_eq!(crystal["data"][0]["values"], json!([6, 6]));

    let groups = &body["space_group_pie"];
    let total: u64 = groups["data"][0]["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(total, 12);

    let hist = &body["sites_hist"];
    assert_eq!(hist["layout"]["title"]["text"], "Distribution of Materials by Sites");
    assert_eq!(hist["data"][0]["type"], "bar");
    assert_eq!(hist["data"][0]["x"].as_array().unwrap().len(), 10);
    assert_eq!(hist["data"][1]["type"], "box");
    assert_eq!(hist["data"][1]["upperfence"], json!([10.0]));
}

#[tokio::test]
async fn test_space_group_pie_keeps_top_groups() {
    let harness = TestHarness::with_config(ServerConfig {
        chart_top_space_groups: 2,
        ..ServerConfig::for_testing()
    });
    for group in ["Fd-3m", "Fd-3m", "Fd-3m", "P6_3/mmc", "P6_3/mmc", "Cmcm", "Imma"] {
        harness.seed(json!({"space_group_symbol": group, "Sites": 4}));
    }

    let body: Value = harness.server.get("/api/charts").await.json();
    let pie = &body["space_group_pie"];

    assert_eq!(pie["layout"]["title"]["text"], "Top 2 Space Group Symbols");
    assert_eq!(pie["data"][0]["labels"], json!(["Fd-3m", "P6_3/mmc"]));
    assert_eq!(pie["data"][0]["values"], json!([3, 2]));
}

#[tokio::test]
async fn test_charts_on_empty_store() {
    let harness = TestHarness::new();

    let body: Value = harness.server.get("/api/charts").await.json();

    assert_eq!(body["crystal_pie"]["data"][0]["labels"], json!([]));
    assert_eq!(body["sites_hist"]["data"].as_array().unwrap().len(), 1);
}
