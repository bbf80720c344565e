/// Demand model loading and inference. The trained artifact carries its own
/// feature-name list; it is rejected at load time unless that list matches
/// the feature builder's schema exactly.

use std::path::Path;

use serde::Deserialize;

use crate::ml::features::{FeatureVector, FEATURE_NAMES};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact at {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact at {path} is not valid JSON: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model feature schema mismatch: expected {expected:?}, got {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("model artifact declares {features} features but {weights} weights")]
    WeightCount { features: usize, weights: usize },

    #[error("model produced a non-finite prediction")]
    NonFinite,
}

/// A trained regressor over the `FEATURE_NAMES` schema. Inference must be
/// deterministic: identical features yield identical output.
pub trait DemandModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

/// On-disk model artifact: trained weights plus the feature-name list they
/// were fitted against.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub version: String,
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

/// Linear regression over the engineered features.
#[derive(Debug)]
pub struct LinearModel {
    version: String,
    weights: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&raw).map_err(|source| ModelError::Malformed {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_artifact(artifact)
    }

    /// Accepts an artifact only if it was trained on exactly the schema this
    /// service builds, order included. A mismatch is a deployment error, not
    /// a transient fault.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.feature_names != FEATURE_NAMES {
            return Err(ModelError::SchemaMismatch {
                expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                actual: artifact.feature_names,
            });
        }
        if artifact.weights.len() != FEATURE_NAMES.len() {
            return Err(ModelError::WeightCount {
                features: FEATURE_NAMES.len(),
                weights: artifact.weights.len(),
            });
        }

        Ok(Self {
            version: artifact.version,
            weights: artifact.weights,
            intercept: artifact.intercept,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl DemandModel for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let values = features.values();
        let prediction = self.intercept
            + values
                .iter()
                .zip(&self.weights)
                .map(|(x, w)| x * w)
                .sum::<f64>();

        if !prediction.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::features::{build_features, DayContext};
    use chrono::NaiveDate;

    fn valid_artifact() -> ModelArtifact {
        ModelArtifact {
            version: "test-1".into(),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            weights: vec![0.0; FEATURE_NAMES.len()],
            intercept: 0.0,
        }
    }

    #[test]
    fn test_accepts_matching_schema() {
        let model = LinearModel::from_artifact(valid_artifact()).unwrap();
        assert_eq!(model.version(), "test-1");
    }

    #[test]
    fn test_rejects_wrong_feature_order() {
        let mut artifact = valid_artifact();
        artifact.feature_names.swap(0, 1);
        let err = LinearModel::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ModelError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_rejects_missing_feature() {
        let mut artifact = valid_artifact();
        artifact.feature_names.pop();
        let err = LinearModel::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ModelError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_rejects_weight_count_mismatch() {
        let mut artifact = valid_artifact();
        artifact.weights.pop();
        let err = LinearModel::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ModelError::WeightCount { .. }));
    }

    #[test]
    fn test_predict_is_intercept_plus_dot_product() {
        let mut artifact = valid_artifact();
        // Weight only lag_1 (index 7 in the schema).
        artifact.weights[7] = 1.0;
        artifact.intercept = 2.0;
        let model = LinearModel::from_artifact(artifact).unwrap();

        let ctx = DayContext {
            pollution_index: 0.0,
            is_festival: false,
            is_flu_season: false,
        };
        let features = build_features(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            &ctx,
            &[5.0],
        );

        assert_eq!(model.predict(&features).unwrap(), 7.0);
    }

    #[test]
    fn test_artifact_parses_from_json() {
        let raw = serde_json::json!({
            "version": "linear-test",
            "feature_names": FEATURE_NAMES,
            "weights": vec![0.5; FEATURE_NAMES.len()],
            "intercept": 1.25,
        });
        let artifact: ModelArtifact = serde_json::from_value(raw).unwrap();
        assert!(LinearModel::from_artifact(artifact).is_ok());
    }
}
