use crate::error::{AppError, Result};
use crate::ml::artifact::ModelArtifact;
use crate::ml::models::ModelMetadata;
use crate::ml::regressor::Regressor;
use crate::models::{PollutantReading, PredictionResult, N_FEATURES};
use ndarray::Array2;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point to the pre-trained model.
///
/// Holds the regressor behind an `Arc` so request handlers share one
/// read-only instance.
#[derive(Clone)]
pub struct ModelGateway {
    regressor: Arc<dyn Regressor>,
}

impl ModelGateway {
    pub fn new(regressor: Arc<dyn Regressor>) -> Self {
        Self { regressor }
    }

    /// Load and validate the artifact at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let artifact = ModelArtifact::from_path(path)?;
        let regressor = artifact.into_regressor()?;
        let metadata = regressor.metadata();

        info!(
            path = %path.display(),
            name = %metadata.name,
            version = %metadata.version,
            model_type = %metadata.model_type,
            n_estimators = ?metadata.n_estimators,
            "Model artifact loaded"
        );

        Ok(Self::new(regressor))
    }

    pub fn metadata(&self) -> &ModelMetadata {
        self.regressor.metadata()
    }

    /// Predict a single reading
    pub fn predict(&self, reading: &PollutantReading) -> Result<PredictionResult> {
        self.predict_batch(std::slice::from_ref(reading))?
            .pop()
            .ok_or_else(|| AppError::Prediction("model returned no prediction".to_string()))
    }

    /// Predict every reading in one model call
    pub fn predict_batch(&self, readings: &[PollutantReading]) -> Result<Vec<PredictionResult>> {
        if readings.is_empty() {
            return Ok(Vec::new());
        }

        for (i, reading) in readings.iter().enumerate() {
            if let Some(field) = reading.first_non_finite() {
                return Err(AppError::Validation(format!(
                    "reading {}: '{}' is not a finite number",
                    i + 1,
                    field
                )));
            }
        }

        let flat: Vec<f64> = readings.iter().flat_map(|r| r.features()).collect();
        let features = Array2::from_shape_vec((readings.len(), N_FEATURES), flat)?;

        let values = self.regressor.predict(&features)?;
        if values.len() != readings.len() {
            return Err(AppError::Prediction(format!(
                "model returned {} predictions for {} readings",
                values.len(),
                readings.len()
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(AppError::Prediction(format!(
                "model returned a non-finite value for reading {}",
                pos + 1
            )));
        }

        debug!(rows = readings.len(), "Predictions computed");

        Ok(values.into_iter().map(PredictionResult::new).collect())
    }
}

impl std::fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGateway")
            .field("metadata", self.metadata())
            .finish()
    }
}
