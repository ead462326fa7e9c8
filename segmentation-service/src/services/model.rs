use super::{LabelsMapping, ModelError, SegmentPipeline};
use std::collections::HashMap;
use std::path::Path;

/// The externally trained segmentation model, consumed as an opaque
/// capability: engineered features in, segment label out.
pub trait SegmentModel: Send + Sync {
    fn predict_label(&self, features: &HashMap<String, f64>) -> Result<String, ModelError>;
    fn health_check(&self) -> Result<(), ModelError>;
}

/// Artifact-backed implementation over the exported k-means pipeline.
pub struct ArtifactSegmentModel {
    pipeline: SegmentPipeline,
    labels: LabelsMapping,
}

impl ArtifactSegmentModel {
    pub fn load(model_path: &Path, labels_path: Option<&Path>) -> Result<Self, ModelError> {
        let pipeline = SegmentPipeline::load(model_path)?;
        let labels = LabelsMapping::load_or_default(labels_path);

        tracing::info!(
            features = pipeline.feature_names.len(),
            clusters = pipeline.centroids.len(),
            mapped_labels = labels.labels_mapping.len(),
            "Loaded segmentation pipeline"
        );

        Ok(Self { pipeline, labels })
    }
}

impl SegmentModel for ArtifactSegmentModel {
    fn predict_label(&self, features: &HashMap<String, f64>) -> Result<String, ModelError> {
        let mut vector = Vec::with_capacity(self.pipeline.feature_names.len());
        for name in &self.pipeline.feature_names {
            let value = features
                .get(name)
                .copied()
                .ok_or_else(|| ModelError::MissingFeature(name.clone()))?;
            vector.push(value);
        }

        if let Some(scaler) = &self.pipeline.scaler {
            scaler.transform(&mut vector)?;
        }

        let cluster = self.pipeline.predict(&vector);
        let label = self.labels.label_for(cluster);

        tracing::debug!(cluster, label = %label, "Segment prediction");

        Ok(label)
    }

    fn health_check(&self) -> Result<(), ModelError> {
        // Artifacts are validated at load time and immutable afterwards.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ScalerParams;

    fn model() -> ArtifactSegmentModel {
        ArtifactSegmentModel {
            pipeline: SegmentPipeline {
                feature_names: vec!["Savings_Ratio".to_string(), "Rent_PctIncome".to_string()],
                scaler: Some(ScalerParams {
                    mean: vec![0.2, 0.3],
                    scale: vec![0.1, 0.1],
                }),
                centroids: vec![vec![1.0, -1.0], vec![-1.0, 1.0], vec![0.0, 0.0]],
            },
            labels: LabelsMapping::default(),
        }
    }

    #[test]
    fn predicts_through_scaler_and_centroids() {
        let model = model();
        // scales to (1.0, -1.0) -> cluster 0 -> fallback label
        let features = HashMap::from([
            ("Savings_Ratio".to_string(), 0.3),
            ("Rent_PctIncome".to_string(), 0.2),
        ]);
        assert_eq!(model.predict_label(&features).unwrap(), "conservative saver");
    }

    #[test]
    fn missing_trained_feature_is_an_error() {
        let model = model();
        let features = HashMap::from([("Savings_Ratio".to_string(), 0.3)]);
        let err = model.predict_label(&features).unwrap_err();
        assert!(matches!(err, ModelError::MissingFeature(name) if name == "Rent_PctIncome"));
    }
}
