use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::models::{engineer_features, BudgetQuery, RatioAllocation};
use crate::services::record_segmentation;
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub label: String,
    pub ratios: RatioAllocation,
}

/// Segment a spending profile and return its budget-ratio allocation.
///
/// Accepts either the lite shape (income + commitments, labeled by the
/// burden heuristic) or the full feature shape (run through the trained
/// pipeline). Anything else is a 400.
#[tracing::instrument(skip(state, body))]
pub async fn segment(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SegmentResponse>, AppError> {
    let (label, source) = match BudgetQuery::classify(body)? {
        BudgetQuery::Lite(payload) => {
            let label = payload.segment_label().to_string();
            tracing::debug!(
                income = payload.income,
                commitments = payload.commitments.total(),
                burden = payload.burden(),
                lifestyle = ?payload.lifestyle,
                label = %label,
                "Heuristic segmentation"
            );
            (label, "lite")
        }
        BudgetQuery::Full(raw) => {
            let features = engineer_features(&raw);
            let label = state.model.predict_label(&features)?;
            (label, "full")
        }
    };

    let ratios = RatioAllocation::for_label(&label).normalized();
    record_segmentation(source, &label);

    tracing::info!(source, label = %label, "Segmentation served");

    Ok(Json(SegmentResponse { label, ratios }))
}
