use serde::Deserialize;
use service_core::config as core_config;
use service_core::config::get_env;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentationConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub artifacts: ArtifactConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    /// Path to the exported k-means pipeline (feature order, scaler, centroids).
    pub model_path: String,
    /// Optional cluster-id-to-label mapping. A missing file degrades to the
    /// built-in fallback labels.
    pub labels_path: Option<String>,
}

impl SegmentationConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(SegmentationConfig {
            common,
            artifacts: ArtifactConfig {
                model_path: get_env(
                    "SEGMENT_MODEL_PATH",
                    Some("artifacts/segment_model.json"),
                    is_prod,
                )?,
                labels_path: env::var("SEGMENT_LABELS_PATH").ok(),
            },
        })
    }
}
