//! Metrics collection for risk-service.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static RISK_PREDICTIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize metrics collection. Called once from `main`.
pub fn init_metrics() {
    let registry = Registry::new();

    let predictions_counter = IntCounterVec::new(
        Opts::new(
            "risk_predictions_total",
            "Total risk predictions by predicted level",
        ),
        &["risk_level"],
    )
    .expect("Failed to create risk_predictions_total metric");

    registry
        .register(Box::new(predictions_counter.clone()))
        .expect("Failed to register risk_predictions_total");

    PROMETHEUS_REGISTRY
        .set(registry)
        .expect("Failed to set prometheus registry");
    RISK_PREDICTIONS_TOTAL
        .set(predictions_counter)
        .expect("Failed to set risk_predictions_total");
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    let Some(registry) = PROMETHEUS_REGISTRY.get() else {
        return "# Metrics recorder not initialized\n".to_string();
    };

    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).ok();
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record a served prediction.
pub fn record_prediction(risk_level: &str) {
    if let Some(counter) = RISK_PREDICTIONS_TOTAL.get() {
        counter.with_label_values(&[risk_level]).inc();
    }
}
