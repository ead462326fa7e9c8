use serde::Deserialize;
use service_core::config as core_config;
use service_core::config::get_env;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub artifacts: ArtifactConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    /// Exported clustering model (centroids).
    pub model_path: String,
    /// Exported scaler; its feature order is authoritative at predict time.
    pub scaler_path: String,
    /// Cluster-id-to-risk-level mapping.
    pub mapping_path: String,
}

impl RiskConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(RiskConfig {
            common,
            artifacts: ArtifactConfig {
                model_path: get_env("RISK_MODEL_PATH", Some("artifacts/risk_model.json"), is_prod)?,
                scaler_path: get_env(
                    "RISK_SCALER_PATH",
                    Some("artifacts/risk_scaler.json"),
                    is_prod,
                )?,
                mapping_path: get_env(
                    "RISK_MAPPING_PATH",
                    Some("artifacts/risk_mapping.json"),
                    is_prod,
                )?,
            },
        })
    }
}
