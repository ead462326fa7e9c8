use super::{ClusterModel, ModelError, RiskMapping, RiskScaler};
use crate::models::{RiskLevel, RiskQuery};
use std::path::Path;

/// The externally trained risk model, consumed as an opaque capability:
/// questionnaire in, risk level out.
pub trait RiskModel: Send + Sync {
    fn predict_level(&self, query: &RiskQuery) -> Result<RiskLevel, ModelError>;
    fn health_check(&self) -> Result<(), ModelError>;
}

/// Artifact-backed implementation over the exported scaler and centroids.
pub struct ArtifactRiskModel {
    scaler: RiskScaler,
    model: ClusterModel,
    mapping: RiskMapping,
}

impl ArtifactRiskModel {
    pub fn load(
        model_path: &Path,
        scaler_path: &Path,
        mapping_path: &Path,
    ) -> Result<Self, ModelError> {
        let scaler = RiskScaler::load(scaler_path)?;
        let model = ClusterModel::load(model_path, scaler.feature_names_in.len())?;
        let mapping = RiskMapping::load(mapping_path)?;

        tracing::info!(
            features = scaler.feature_names_in.len(),
            clusters = model.centroids.len(),
            mapped_levels = mapping.levels.len(),
            "Loaded risk model artifacts"
        );

        Ok(Self {
            scaler,
            model,
            mapping,
        })
    }
}

impl RiskModel for ArtifactRiskModel {
    fn predict_level(&self, query: &RiskQuery) -> Result<RiskLevel, ModelError> {
        let assembled = query.assemble();
        let scaled = self.scaler.transform(&assembled)?;
        let cluster = self.model.predict(&scaled);
        let level = self.mapping.level_for(cluster);

        tracing::debug!(
            ?assembled,
            ?scaled,
            cluster,
            level = %level,
            "Risk prediction"
        );

        Ok(level)
    }

    fn health_check(&self) -> Result<(), ModelError> {
        // Artifacts are validated at load time and immutable afterwards.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn feature_names() -> Vec<String> {
        [
            "age",
            "cholesterol",
            "occup_danger",
            "bmi",
            "smoker",
            "diabetes",
            "hds",
            "asthma",
            "alcohol",
            "exercise",
            "family_cancer",
        ]
        .iter()
        .map(|name| name.to_string())
        .collect()
    }

    fn model(mapping: RiskMapping) -> ArtifactRiskModel {
        let names = feature_names();
        let dims = names.len();
        // Identity scaling keeps the test arithmetic readable.
        let scaler = RiskScaler {
            feature_names_in: names,
            mean: vec![0.0; dims],
            scale: vec![1.0; dims],
        };
        // Centroid 0 is a young healthy profile, centroid 1 an older one
        // with every flag set.
        let centroids = vec![
            vec![20.0, 150.0, 1.0, 0.04, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0, 0.0],
            vec![70.0, 280.0, 4.0, 0.07, 1.0, 1.0, 1.0, 1.0, 7.0, 0.0, 1.0],
        ];
        ArtifactRiskModel {
            scaler,
            model: ClusterModel { centroids },
            mapping,
        }
    }

    fn query(age: i64, cholesterol: i64, smoke: &str) -> RiskQuery {
        serde_json::from_value(json!({
            "age": age,
            "cholesterol": cholesterol,
            "occupation": 1,
            "bmi": 22.0,
            "smoke": smoke,
            "diabetes": "No",
            "heart_disease": "No",
            "asthma": "No",
            "alcohol": 0,
            "exercise": 4,
            "family_cancer": "No",
        }))
        .unwrap()
    }

    #[test]
    fn predicts_the_mapped_level() {
        let mapping: RiskMapping = serde_json::from_str(r#"{"0": "Low", "1": "High"}"#).unwrap();
        let model = model(mapping);

        assert_eq!(
            model.predict_level(&query(25, 160, "No")).unwrap(),
            RiskLevel::Low
        );
        assert_eq!(
            model.predict_level(&query(68, 270, "Yes")).unwrap(),
            RiskLevel::High
        );
    }

    #[test]
    fn unmapped_cluster_defaults_to_medium() {
        let model = model(RiskMapping {
            levels: HashMap::new(),
        });

        assert_eq!(
            model.predict_level(&query(25, 160, "No")).unwrap(),
            RiskLevel::Medium
        );
    }
}
