use std::collections::BTreeMap;
use std::io::Read;

use serde::Serialize;
use tracing::info;

use crate::batch::parser::{parse_csv_reader, BatchInput};
use crate::error::{AppError, Result};
use crate::ml::ModelGateway;
use crate::models::{EvaluationOutcome, PollutantReading, PredictionResult, SeverityCategory};

/// One processed row of an upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub reading: PollutantReading,
    pub prediction: PredictionResult,
    pub evaluation: Option<EvaluationOutcome>,
}

/// Result of a whole upload. `has_actual` is true exactly when every row
/// carries an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub rows: Vec<BatchRow>,
    pub has_actual: bool,
}

/// Aggregate view of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_rows: usize,
    pub per_category: BTreeMap<String, usize>,
    pub needs_review: Option<usize>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn predictions(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.prediction.value).collect()
    }

    /// Ground-truth series, only when the upload had a `max` column
    pub fn actuals(&self) -> Option<Vec<f64>> {
        if !self.has_actual {
            return None;
        }
        self.rows
            .iter()
            .map(|r| r.evaluation.map(|e| e.actual))
            .collect()
    }

    pub fn summary(&self) -> BatchSummary {
        let mut per_category = BTreeMap::new();
        for row in &self.rows {
            *per_category
                .entry(row.prediction.category.label().to_string())
                .or_insert(0) += 1;
        }

        let needs_review = self.has_actual.then(|| {
            self.rows
                .iter()
                .filter(|r| r.evaluation.is_some_and(|e| e.verdict.needs_review()))
                .count()
        });

        BatchSummary {
            total_rows: self.rows.len(),
            per_category,
            needs_review,
        }
    }

    pub fn count_in(&self, category: SeverityCategory) -> usize {
        self.rows
            .iter()
            .filter(|r| r.prediction.category == category)
            .count()
    }
}

/// Predict, classify and (when ground truth exists) evaluate every row.
pub fn process_batch(gateway: &ModelGateway, input: BatchInput) -> Result<BatchResult> {
    let predictions = gateway.predict_batch(&input.readings)?;
    let has_actual = input.has_actual();

    let rows: Vec<BatchRow> = match input.actuals {
        Some(actuals) => {
            if actuals.len() != input.readings.len() {
                return Err(AppError::Internal(format!(
                    "{} actual values for {} readings",
                    actuals.len(),
                    input.readings.len()
                )));
            }
            input
                .readings
                .into_iter()
                .zip(predictions)
                .zip(actuals)
                .map(|((reading, prediction), actual)| BatchRow {
                    reading,
                    prediction,
                    evaluation: Some(prediction.evaluate(actual)),
                })
                .collect()
        }
        None => input
            .readings
            .into_iter()
            .zip(predictions)
            .map(|(reading, prediction)| BatchRow {
                reading,
                prediction,
                evaluation: None,
            })
            .collect(),
    };

    let result = BatchResult { rows, has_actual };
    let summary = result.summary();
    info!(
        rows = summary.total_rows,
        evaluated = has_actual,
        needs_review = ?summary.needs_review,
        "Batch processed"
    );

    Ok(result)
}

/// Parse an uploaded CSV and process it.
pub fn process_csv<R: Read>(gateway: &ModelGateway, reader: R) -> Result<BatchResult> {
    let input = parse_csv_reader(reader)?;
    process_batch(gateway, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::{ModelMetadata, ModelType, Regressor};
    use crate::models::{Verdict, N_FEATURES};
    use ndarray::Array2;
    use std::sync::Arc;

    /// Returns the ozone reading as the index
    struct OzoneRegressor(ModelMetadata);

    impl Regressor for OzoneRegressor {
        fn predict(&self, features: &Array2<f64>) -> Result<Vec<f64>> {
            Ok(features.column(4).to_vec())
        }

        fn metadata(&self) -> &ModelMetadata {
            &self.0
        }
    }

    fn gateway() -> ModelGateway {
        ModelGateway::new(Arc::new(OzoneRegressor(ModelMetadata {
            name: "ozone".to_string(),
            version: "test".to_string(),
            model_type: ModelType::Custom,
            n_features: N_FEATURES,
            feature_names: vec![],
            n_estimators: None,
        })))
    }

    const HEADER: &str =
        "pm_sepuluh,pm_duakomalima,sulfur_dioksida,karbon_monoksida,ozon,nitrogen_dioksida";

    #[test]
    fn test_batch_without_actual_has_no_evaluations() {
        let csv = format!("{}\n0,0,0,0,40,0\n0,0,0,0,150,0\n", HEADER);
        let result = process_csv(&gateway(), csv.as_bytes()).unwrap();

        assert!(!result.has_actual);
        assert!(result.rows.iter().all(|r| r.evaluation.is_none()));
        assert_eq!(result.actuals(), None);
        assert_eq!(result.predictions(), vec![40.0, 150.0]);
        assert_eq!(result.summary().needs_review, None);
    }

    #[test]
    fn test_batch_with_actual_evaluates_every_row() {
        let csv = format!(
            "{},max\n0,0,0,0,120,0,118.5\n0,0,0,0,80,0,81\n",
            HEADER
        );
        let result = process_csv(&gateway(), csv.as_bytes()).unwrap();

        assert!(result.has_actual);
        let verdicts: Vec<Verdict> = result
            .rows
            .iter()
            .map(|r| r.evaluation.unwrap().verdict)
            .collect();
        assert_eq!(verdicts, vec![Verdict::NeedsReview, Verdict::NoReviewNeeded]);
        assert_eq!(result.actuals(), Some(vec![118.5, 81.0]));
        assert_eq!(result.summary().needs_review, Some(1));
    }

    #[test]
    fn test_summary_counts_categories() {
        let csv = format!("{}\n0,0,0,0,10,0\n0,0,0,0,20,0\n0,0,0,0,350,0\n", HEADER);
        let result = process_csv(&gateway(), csv.as_bytes()).unwrap();
        let summary = result.summary();

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.per_category.get("Baik"), Some(&2));
        assert_eq!(summary.per_category.get("Berbahaya"), Some(&1));
        assert_eq!(result.count_in(SeverityCategory::Good), 2);
    }

    #[test]
    fn test_malformed_upload_yields_no_partial_result() {
        let csv = format!("{}\n0,0,0,0,10,0\n0,0,0,0,x,0\n", HEADER);
        let err = process_csv(&gateway(), csv.as_bytes()).unwrap_err();
        assert!(err.is_upload_error());
    }
}
