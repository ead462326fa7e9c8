//! Metrics collection for segmentation-service.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static SEGMENTATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize metrics collection. Called once from `main`.
pub fn init_metrics() {
    let registry = Registry::new();

    let segmentations_counter = IntCounterVec::new(
        Opts::new(
            "segmentations_total",
            "Total segmentation requests by payload source and predicted label",
        ),
        &["source", "label"],
    )
    .expect("Failed to create segmentations_total metric");

    registry
        .register(Box::new(segmentations_counter.clone()))
        .expect("Failed to register segmentations_total");

    PROMETHEUS_REGISTRY
        .set(registry)
        .expect("Failed to set prometheus registry");
    SEGMENTATIONS_TOTAL
        .set(segmentations_counter)
        .expect("Failed to set segmentations_total");
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

/// Record a served segmentation.
pub fn record_segmentation(source: &str, label: &str) {
    if let Some(counter) = SEGMENTATIONS_TOTAL.get() {
        counter.with_label_values(&[source, label]).inc();
    }
}
