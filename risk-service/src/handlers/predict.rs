use axum::{extract::State, Json};
use serde::Serialize;
use validator::Validate;

use crate::models::{RiskLevel, RiskQuery};
use crate::services::record_prediction;
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
pub struct PredictRiskResponse {
    pub risk_level: RiskLevel,
}

/// Predict a risk level for a health/lifestyle questionnaire.
#[tracing::instrument(skip(state, request))]
pub async fn predict_risk(
    State(state): State<AppState>,
    Json(request): Json<RiskQuery>,
) -> Result<Json<PredictRiskResponse>, AppError> {
    request.validate()?;

    let risk_level = state.model.predict_level(&request)?;
    record_prediction(&risk_level.to_string());

    tracing::info!(risk_level = %risk_level, "Risk prediction served");

    Ok(Json(PredictRiskResponse { risk_level }))
}
