use serde::{Deserialize, Serialize};

use super::category::SeverityCategory;
use super::evaluation::{evaluate, EvaluationOutcome};

/// Predicted ISPU value with its severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub value: f64,
    pub category: SeverityCategory,
}

impl PredictionResult {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            category: SeverityCategory::categorize(value),
        }
    }

    /// Compare this prediction against a ground-truth value.
    pub fn evaluate(&self, actual: f64) -> EvaluationOutcome {
        evaluate(self.value, actual)
    }
}
