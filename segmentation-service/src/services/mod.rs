pub mod artifacts;
pub mod metrics;
pub mod model;

use service_core::error::AppError;
use thiserror::Error;

pub use artifacts::{LabelsMapping, ScalerParams, SegmentPipeline};
pub use metrics::{get_metrics, init_metrics, record_segmentation};
pub use model::{ArtifactSegmentModel, SegmentModel};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Feature '{0}' missing from payload")]
    MissingFeature(String),
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}
