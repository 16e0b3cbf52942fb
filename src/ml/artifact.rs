use crate::error::{AppError, Result};
use crate::ml::forest::{RandomForestRegressor, RegressionTree};
use crate::ml::linear::LinearRegressor;
use crate::ml::models::{ModelMetadata, ModelType};
use crate::ml::regressor::Regressor;
use crate::models::{FEATURE_COLUMNS, N_FEATURES};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Serialized model as exported from the training environment.
///
/// ```json
/// { "model_type": "random_forest", "n_features": 6,
///   "feature_names": ["pm_sepuluh", ...], "trees": [ ... ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    pub n_features: usize,

    /// Column order used at training time
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,

    #[serde(flatten)]
    pub estimator: Estimator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum Estimator {
    RandomForest { trees: Vec<RegressionTree> },
    Linear { coefficients: Vec<f64>, intercept: f64 },
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::ModelLoad(format!("invalid artifact: {}", e)))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::ModelLoad(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn model_type(&self) -> ModelType {
        match self.estimator {
            Estimator::RandomForest { .. } => ModelType::RandomForest,
            Estimator::Linear { .. } => ModelType::Linear,
        }
    }

    /// Validate the artifact against the pollutant feature layout and build
    /// the matching regressor.
    pub fn into_regressor(self) -> Result<Arc<dyn Regressor>> {
        if self.n_features != N_FEATURES {
            return Err(AppError::ModelLoad(format!(
                "model expects {} features, pollutant readings have {}",
                self.n_features, N_FEATURES
            )));
        }
        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_COLUMNS) {
                return Err(AppError::ModelLoad(format!(
                    "feature order {:?} does not match {:?}",
                    names, FEATURE_COLUMNS
                )));
            }
        }

        let model_type = self.model_type();
        let mut metadata = ModelMetadata {
            name: self.name.unwrap_or_else(|| model_type.to_string()),
            version: self.version.unwrap_or_else(|| "unknown".to_string()),
            model_type,
            n_features: self.n_features,
            feature_names: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            n_estimators: None,
        };

        let regressor: Arc<dyn Regressor> = match self.estimator {
            Estimator::RandomForest { trees } => {
                metadata.n_estimators = Some(trees.len());
                Arc::new(RandomForestRegressor::new(metadata, trees)?)
            }
            Estimator::Linear {
                coefficients,
                intercept,
            } => Arc::new(LinearRegressor::new(metadata, coefficients, intercept)?),
        };

        Ok(regressor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const LINEAR: &str = r#"{
        "model_type": "linear",
        "name": "ispu-linear",
        "n_features": 6,
        "feature_names": ["pm_sepuluh", "pm_duakomalima", "sulfur_dioksida",
                          "karbon_monoksida", "ozon", "nitrogen_dioksida"],
        "coefficients": [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        "intercept": 2.0
    }"#;

    #[test]
    fn test_parse_linear_artifact() {
        let artifact = ModelArtifact::from_json(LINEAR).unwrap();
        assert_eq!(artifact.model_type(), ModelType::Linear);

        let regressor = artifact.into_regressor().unwrap();
        assert_eq!(regressor.metadata().name, "ispu-linear");
        let preds = regressor
            .predict(&array![[50.0, 30.0, 12.0, 1.5, 100.0, 35.0]])
            .unwrap();
        assert_eq!(preds, vec![52.0]);
    }

    #[test]
    fn test_parse_forest_artifact() {
        let json = r#"{
            "model_type": "random_forest",
            "n_features": 6,
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [4, -2, -2],
                "threshold": [80.0, -2.0, -2.0],
                "value": [0.0, 40.0, 120.0]
            }]
        }"#;
        let regressor = ModelArtifact::from_json(json)
            .unwrap()
            .into_regressor()
            .unwrap();
        assert_eq!(regressor.metadata().n_estimators, Some(1));
        assert_eq!(regressor.metadata().version, "unknown");
        let preds = regressor
            .predict(&array![[0.0, 0.0, 0.0, 0.0, 100.0, 0.0]])
            .unwrap();
        assert_eq!(preds, vec![120.0]);
    }

    #[test]
    fn test_rejects_wrong_feature_count() {
        let json = LINEAR.replace("\"n_features\": 6", "\"n_features\": 5");
        let err = ModelArtifact::from_json(&json)
            .unwrap()
            .into_regressor()
            .err()
            .unwrap();
        assert!(matches!(err, AppError::ModelLoad(_)));
    }

    #[test]
    fn test_rejects_reordered_features() {
        let json = LINEAR.replace(
            "[\"pm_sepuluh\", \"pm_duakomalima\"",
            "[\"pm_duakomalima\", \"pm_sepuluh\"",
        );
        assert!(ModelArtifact::from_json(&json)
            .unwrap()
            .into_regressor()
            .is_err());
    }

    #[test]
    fn test_rejects_unknown_model_type() {
        let json = LINEAR.replace("\"linear\"", "\"svm\"");
        assert!(matches!(
            ModelArtifact::from_json(&json),
            Err(AppError::ModelLoad(_))
        ));
    }

    #[test]
    fn test_missing_file_is_model_load_error() {
        let err = ModelArtifact::from_path(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/model.json"));
    }
}
