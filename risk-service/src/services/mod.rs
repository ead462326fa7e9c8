pub mod artifacts;
pub mod metrics;
pub mod model;

use service_core::error::AppError;
use thiserror::Error;

pub use artifacts::{ClusterModel, RiskMapping, RiskScaler};
pub use metrics::{get_metrics, init_metrics, record_prediction};
pub use model::{ArtifactRiskModel, RiskModel};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Scaler expects feature '{0}' which was not assembled")]
    MissingFeature(String),
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}
