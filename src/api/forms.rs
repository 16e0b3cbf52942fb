//! Request bodies shared by the dashboard forms and the JSON API.

use crate::error::{AppError, Result};
use crate::models::PollutantReading;
use serde::Deserialize;
use validator::Validate;

/// Six pollutant concentrations as typed into the manual form.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ReadingRequest {
    #[validate(range(min = 0.0, max = 500.0))]
    pub pm10: f64,
    #[validate(range(min = 0.0, max = 500.0))]
    pub pm25: f64,
    #[validate(range(min = 0.0, max = 500.0))]
    pub so2: f64,
    #[validate(range(min = 0.0, max = 500.0))]
    pub co: f64,
    #[validate(range(min = 0.0, max = 500.0))]
    pub o3: f64,
    #[validate(range(min = 0.0, max = 500.0))]
    pub no2: f64,
}

impl ReadingRequest {
    /// The submitted values as-is, for redrawing the form
    pub fn as_reading(&self) -> PollutantReading {
        PollutantReading::new(self.pm10, self.pm25, self.so2, self.co, self.o3, self.no2)
    }

    /// Validate and convert into a model reading
    pub fn into_reading(self) -> Result<PollutantReading> {
        self.validate()?;
        let reading = self.as_reading();
        if let Some(field) = reading.first_non_finite() {
            return Err(AppError::Validation(format!("{field} must be a finite number")));
        }
        Ok(reading)
    }
}

impl From<PollutantReading> for ReadingRequest {
    fn from(r: PollutantReading) -> Self {
        Self {
            pm10: r.pm10,
            pm25: r.pm25,
            so2: r.so2,
            co: r.co,
            o3: r.o3,
            no2: r.no2,
        }
    }
}

/// JSON prediction request, optionally with the measured value.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PredictRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub reading: ReadingRequest,

    #[validate(range(min = 0.0))]
    pub actual: Option<f64>,
}

/// Ground-truth comparison for an earlier prediction.
///
/// The dashboard also posts back the reading that produced the
/// prediction so the form can be redrawn.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EvaluateRequest {
    pub predicted: f64,

    #[validate(range(min = 0.0))]
    pub actual: f64,

    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default)]
    pub pm25: Option<f64>,
    #[serde(default)]
    pub so2: Option<f64>,
    #[serde(default)]
    pub co: Option<f64>,
    #[serde(default)]
    pub o3: Option<f64>,
    #[serde(default)]
    pub no2: Option<f64>,
}

impl EvaluateRequest {
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if !self.predicted.is_finite() || !self.actual.is_finite() {
            return Err(AppError::Validation(
                "predicted and actual must be finite numbers".to_string(),
            ));
        }
        Ok(())
    }

    /// The reading carried along with the form, when all six are present
    pub fn reading(&self) -> Option<PollutantReading> {
        Some(PollutantReading::new(
            self.pm10?, self.pm25?, self.so2?, self.co?, self.o3?, self.no2?,
        ))
    }
}
