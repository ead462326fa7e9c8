//! On-disk formats for the externally trained risk model artifacts.
//!
//! Three JSON exports: the fitted scaler (whose `feature_names_in` is the
//! authoritative column order), the clustering model's centroids, and the
//! cluster-id-to-risk-level mapping. Loaded once at startup, immutable
//! afterwards.

use super::ModelError;
use crate::models::RiskLevel;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ModelError::Artifact(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ModelError::Artifact(format!("failed to parse {}: {}", path.display(), e)))
}

/// The fitted standard scaler.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskScaler {
    pub feature_names_in: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl RiskScaler {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let scaler: Self = read_json(path)?;
        if scaler.mean.len() != scaler.feature_names_in.len()
            || scaler.scale.len() != scaler.feature_names_in.len()
        {
            return Err(ModelError::Artifact(
                "scaler parameter lengths do not match feature_names_in".to_string(),
            ));
        }
        Ok(scaler)
    }

    /// Select the assembled features in training order and standardize them.
    pub fn transform(&self, features: &HashMap<String, f64>) -> Result<Vec<f64>, ModelError> {
        self.feature_names_in
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = features
                    .get(name)
                    .copied()
                    .ok_or_else(|| ModelError::MissingFeature(name.clone()))?;
                // A zero-variance column exports scale 0; treat it as 1 the
                // way the training library does.
                let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
                Ok((value - self.mean[i]) / scale)
            })
            .collect()
    }
}

/// The exported clustering model.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterModel {
    pub centroids: Vec<Vec<f64>>,
}

impl ClusterModel {
    pub fn load(path: &Path, dimensions: usize) -> Result<Self, ModelError> {
        let model: Self = read_json(path)?;
        if model.centroids.is_empty() {
            return Err(ModelError::Artifact("model has no centroids".to_string()));
        }
        for centroid in &model.centroids {
            if centroid.len() != dimensions {
                return Err(ModelError::Artifact(format!(
                    "centroid has {} dimensions, expected {}",
                    centroid.len(),
                    dimensions
                )));
            }
        }
        Ok(model)
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

/// Cluster-id-to-risk-level mapping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RiskMapping {
    pub levels: HashMap<u32, RiskLevel>,
}

impl RiskMapping {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        read_json(path)
    }

    /// Mapped level, or `Medium` for cluster ids the artifact does not cover.
    pub fn level_for(&self, cluster: u32) -> RiskLevel {
        self.levels.get(&cluster).copied().unwrap_or(RiskLevel::Medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_follows_the_scaler_column_order() {
        let scaler = RiskScaler {
            feature_names_in: vec!["b".to_string(), "a".to_string()],
            mean: vec![1.0, 2.0],
            scale: vec![2.0, 1.0],
        };
        let features = HashMap::from([("a".to_string(), 4.0), ("b".to_string(), 3.0)]);

        // "b" first, then "a"
        assert_eq!(scaler.transform(&features).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn transform_rejects_missing_columns() {
        let scaler = RiskScaler {
            feature_names_in: vec!["a".to_string(), "weight".to_string()],
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 1.0],
        };
        let features = HashMap::from([("a".to_string(), 1.0)]);

        let err = scaler.transform(&features).unwrap_err();
        assert!(matches!(err, ModelError::MissingFeature(name) if name == "weight"));
    }

    #[test]
    fn predict_picks_the_nearest_centroid() {
        let model = ClusterModel {
            centroids: vec![vec![0.0, 0.0], vec![5.0, 5.0]],
        };
        assert_eq!(model.predict(&[1.0, 0.5]), 0);
        assert_eq!(model.predict(&[4.0, 6.0]), 1);
    }

    #[test]
    fn unmapped_cluster_ids_default_to_medium() {
        let mapping: RiskMapping = serde_json::from_str(r#"{"0": "Low", "1": "High"}"#).unwrap();
        assert_eq!(mapping.level_for(0), RiskLevel::Low);
        assert_eq!(mapping.level_for(1), RiskLevel::High);
        assert_eq!(mapping.level_for(9), RiskLevel::Medium);
    }
}
