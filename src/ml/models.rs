use serde::{Deserialize, Serialize};

/// Descriptive metadata of a loaded model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name
    pub name: String,

    /// Model version
    pub version: String,

    /// Model type
    pub model_type: ModelType,

    /// Number of features
    pub n_features: usize,

    /// Feature names in input order
    pub feature_names: Vec<String>,

    /// Number of trees (ensembles only)
    pub n_estimators: Option<usize>,
}

/// Model type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    RandomForest,
    Linear,
    Custom,
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelType::RandomForest => write!(f, "Random Forest"),
            ModelType::Linear => write!(f, "Linear Regression"),
            ModelType::Custom => write!(f, "Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_type_display() {
        assert_eq!(ModelType::RandomForest.to_string(), "Random Forest");
        assert_eq!(ModelType::Linear.to_string(), "Linear Regression");
    }

    #[test]
    fn test_model_type_serde() {
        let json = serde_json::to_string(&ModelType::RandomForest).unwrap();
        assert_eq!(json, "\"random_forest\"");
    }
}
