use crate::error::{AppError, Result};
use crate::ml::models::ModelMetadata;
use crate::ml::regressor::Regressor;
use ndarray::{Array1, Array2};

/// `y = X · coefficients + intercept`
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    metadata: ModelMetadata,
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(metadata: ModelMetadata, coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        if coefficients.len() != metadata.n_features {
            return Err(AppError::ModelLoad(format!(
                "expected {} coefficients, got {}",
                metadata.n_features,
                coefficients.len()
            )));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AppError::ModelLoad(
                "linear model has non-finite parameters".to_string(),
            ));
        }

        Ok(Self {
            metadata,
            coefficients: Array1::from(coefficients),
            intercept,
        })
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &Array2<f64>) -> Result<Vec<f64>> {
        if features.ncols() != self.coefficients.len() {
            return Err(AppError::Prediction(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.ncols()
            )));
        }

        Ok((features.dot(&self.coefficients) + self.intercept).to_vec())
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
