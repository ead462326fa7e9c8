//! On-disk formats for the externally trained model artifacts.
//!
//! Artifacts are JSON exports of the trained scikit-learn objects: the
//! pipeline's feature order, the optional standard-scaler step, the k-means
//! centroids, and the cluster-id-to-label mapping. They are loaded once at
//! startup and never mutated.

use super::ModelError;
use crate::models::DEFAULT_SEGMENT_LABELS;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Standard-scaler parameters of the pipeline's preprocessing step.
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl ScalerParams {
    /// Apply `(x - mean) / scale` in place.
    pub fn transform(&self, features: &mut [f64]) -> Result<(), ModelError> {
        if self.mean.len() != features.len() || self.scale.len() != features.len() {
            return Err(ModelError::Artifact(format!(
                "scaler expects {} features, got {}",
                self.mean.len(),
                features.len()
            )));
        }

        for (i, value) in features.iter_mut().enumerate() {
            // A zero-variance column exports scale 0; treat it as 1 the way
            // the training library does.
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            *value = (*value - self.mean[i]) / scale;
        }

        Ok(())
    }
}

/// The exported k-means pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentPipeline {
    /// Column order the model was trained with; authoritative at predict time.
    pub feature_names: Vec<String>,
    /// The optional preprocessing step, as in the original pipeline.
    #[serde(default)]
    pub scaler: Option<ScalerParams>,
    pub centroids: Vec<Vec<f64>>,
}

impl SegmentPipeline {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ModelError::Artifact(format!("failed to read {}: {}", path.display(), e))
        })?;
        let pipeline: Self = serde_json::from_str(&raw).map_err(|e| {
            ModelError::Artifact(format!("failed to parse {}: {}", path.display(), e))
        })?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.centroids.is_empty() {
            return Err(ModelError::Artifact("pipeline has no centroids".to_string()));
        }
        for centroid in &self.centroids {
            if centroid.len() != self.feature_names.len() {
                return Err(ModelError::Artifact(format!(
                    "centroid has {} dimensions, expected {}",
                    centroid.len(),
                    self.feature_names.len()
                )));
            }
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != self.feature_names.len()
                || scaler.scale.len() != self.feature_names.len()
            {
                return Err(ModelError::Artifact(
                    "scaler dimensions do not match feature names".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Nearest centroid by squared Euclidean distance.
    pub fn predict(&self, features: &[f64]) -> u32 {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;

        for (id, centroid) in self.centroids.iter().enumerate() {
            let distance: f64 = centroid
                .iter()
                .zip(features)
                .map(|(c, x)| (c - x) * (c - x))
                .sum();
            if distance < best_distance {
                best = id;
                best_distance = distance;
            }
        }

        best as u32
    }
}

/// Cluster-id-to-label mapping, exported separately from the pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelsMapping {
    #[serde(default)]
    pub labels_mapping: HashMap<u32, String>,
}

impl LabelsMapping {
    /// Load the mapping, degrading to an empty one when the file is absent
    /// or unreadable. The built-in fallback labels cover that case.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(mapping) => mapping,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse labels mapping {}: {}. Using fallback labels.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read labels mapping {}: {}. Using fallback labels.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Label for a cluster id: the mapped entry, the fixed fallback list for
    /// ids 0..=2, or `cluster-<id>` beyond it.
    pub fn label_for(&self, cluster: u32) -> String {
        if let Some(label) = self.labels_mapping.get(&cluster) {
            return label.clone();
        }
        DEFAULT_SEGMENT_LABELS
            .get(cluster as usize)
            .map(|label| label.to_string())
            .unwrap_or_else(|| format!("cluster-{cluster}"))
    }
}
