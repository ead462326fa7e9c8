//! End-to-end tests for `POST /api/segment`.
//!
//! Run with: cargo test -p segmentation-service --test segment

use reqwest::Client;
use segmentation_service::config::{ArtifactConfig, SegmentationConfig};
use segmentation_service::startup::Application;
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;

const TOLERANCE: f64 = 1e-9;

/// A two-feature pipeline with one centroid per canonical segment.
fn write_artifacts(artifact_dir: &TempDir, labels: Option<&str>) -> SegmentationConfig {
    let model_path = artifact_dir.path().join("segment_model.json");
    std::fs::write(
        &model_path,
        r#"{
            "feature_names": ["Savings_Ratio", "Rent_PctIncome"],
            "centroids": [[0.3, 0.2], [0.15, 0.3], [0.05, 0.5]]
        }"#,
    )
    .expect("Failed to write model artifact");

    let labels_path = labels.map(|contents| {
        let path = artifact_dir.path().join("segment_labels.json");
        std::fs::write(&path, contents).expect("Failed to write labels artifact");
        path.to_string_lossy().into_owned()
    });

    SegmentationConfig {
        common: service_core::config::Config { port: 0 },
        artifacts: ArtifactConfig {
            model_path: model_path.to_string_lossy().into_owned(),
            labels_path,
        },
    }
}

async fn spawn_app(config: SegmentationConfig) -> u16 {
    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

async fn post_segment(port: u16, body: Value) -> reqwest::Response {
    Client::new()
        .post(format!("http://localhost:{}/api/segment", port))
        .json(&body)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
}

fn assert_convex(ratios: &Value) {
    let total: f64 = ["essentials", "savings", "insurance", "other"]
        .iter()
        .map(|key| {
            let value = ratios[key].as_f64().expect("ratio is not a number");
            assert!(value >= 0.0, "{key} is negative");
            value
        })
        .sum();
    assert!((total - 1.0).abs() < TOLERANCE, "ratios sum to {total}");
}

#[tokio::test]
async fn lite_payload_with_high_burden_is_an_over_spender() {
    let artifact_dir = TempDir::new().unwrap();
    let port = spawn_app(write_artifacts(&artifact_dir, None)).await;

    let response = post_segment(
        port,
        json!({
            "income": 1000.0,
            "commitments": {"housingLoan": 400.0, "carLoan": 200.0},
            "lifestyle": "Luxury",
        }),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["label"], "frequent over-spender");
    assert!((body["ratios"]["essentials"].as_f64().unwrap() - 0.58).abs() < TOLERANCE);
    assert!((body["ratios"]["other"].as_f64().unwrap() - 0.12).abs() < TOLERANCE);
    assert_convex(&body["ratios"]);
}

#[tokio::test]
async fn lite_payload_boundary_burdens_resolve_to_the_extremes() {
    let artifact_dir = TempDir::new().unwrap();
    let port = spawn_app(write_artifacts(&artifact_dir, None)).await;

    // burden exactly 0.4 -> conservative saver
    let response = post_segment(
        port,
        json!({"income": 1000.0, "commitments": {"housingLoan": 400.0}}),
    )
    .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["label"], "conservative saver");
    assert!((body["ratios"]["savings"].as_f64().unwrap() - 0.30).abs() < TOLERANCE);
    assert_convex(&body["ratios"]);

    // burden exactly 0.5 -> balanced spender
    let response = post_segment(
        port,
        json!({"income": 1000.0, "commitments": {"insurance": 500.0}}),
    )
    .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["label"], "balanced spender");
    assert!((body["ratios"]["essentials"].as_f64().unwrap() - 0.55).abs() < TOLERANCE);
    assert_convex(&body["ratios"]);
}

#[tokio::test]
async fn zero_income_lite_payload_does_not_divide_by_zero() {
    let artifact_dir = TempDir::new().unwrap();
    let port = spawn_app(write_artifacts(&artifact_dir, None)).await;

    let response = post_segment(port, json!({"income": 0, "commitments": {}})).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["label"], "conservative saver");
    assert_convex(&body["ratios"]);
}

#[tokio::test]
async fn full_payload_is_served_by_the_trained_pipeline() {
    let artifact_dir = TempDir::new().unwrap();
    let port = spawn_app(write_artifacts(&artifact_dir, None)).await;

    // Savings_Ratio 0.3, Rent_PctIncome 0.2 -> centroid 0 -> fallback label
    let response = post_segment(
        port,
        json!({
            "Income": 100000.0,
            "Rent": 20000.0,
            "Desired_Savings": 30000.0,
        }),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["label"], "conservative saver");
    assert!((body["ratios"]["essentials"].as_f64().unwrap() - 0.50).abs() < TOLERANCE);
    assert_convex(&body["ratios"]);
}

#[tokio::test]
async fn full_payload_labels_come_from_the_mapping_artifact() {
    let artifact_dir = TempDir::new().unwrap();
    let config = write_artifacts(
        &artifact_dir,
        Some(r#"{"labels_mapping": {"2": "Frequent OVER-spender"}}"#),
    );
    let port = spawn_app(config).await;

    // Savings_Ratio 0.05, Rent_PctIncome 0.5 -> centroid 2 -> mapped label
    let response = post_segment(
        port,
        json!({
            "Income": 100000.0,
            "Rent": 50000.0,
            "Desired_Savings": 5000.0,
        }),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["label"], "Frequent OVER-spender");
    // case-insensitive substring match still lands on the over-spender split
    assert!((body["ratios"]["essentials"].as_f64().unwrap() - 0.58).abs() < TOLERANCE);
    assert_convex(&body["ratios"]);
}

#[tokio::test]
async fn full_payload_with_zero_income_is_served() {
    let artifact_dir = TempDir::new().unwrap();
    let port = spawn_app(write_artifacts(&artifact_dir, None)).await;

    // Income 0 is treated as 1, so the ratios blow up instead of erroring;
    // the request must still succeed.
    let response = post_segment(
        port,
        json!({
            "Income": 0.0,
            "Rent": 300.0,
            "Desired_Savings": 50.0,
        }),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_convex(&body["ratios"]);
}

#[tokio::test]
async fn unsupported_payload_is_a_400() {
    let artifact_dir = TempDir::new().unwrap();
    let port = spawn_app(write_artifacts(&artifact_dir, None)).await;

    let response = post_segment(port, json!({"unexpected": true})).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unsupported payload");
}

#[tokio::test]
async fn lite_payload_with_wrong_types_is_a_400() {
    let artifact_dir = TempDir::new().unwrap();
    let port = spawn_app(write_artifacts(&artifact_dir, None)).await;

    let response = post_segment(
        port,
        json!({"income": "lots", "commitments": {}}),
    )
    .await;

    assert_eq!(response.status(), 400);
}
