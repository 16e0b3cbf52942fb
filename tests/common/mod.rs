//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use ispu_predictor::{
    api::{build_router, AppState},
    error::Result,
    ml::{ModelGateway, ModelMetadata, ModelType, Regressor},
    models::N_FEATURES,
};
use ndarray::Array2;
use std::sync::Arc;

/// CSV with ground truth. Predictions equal the `ozon` column, so the first
/// row is within tolerance and the second needs review.
pub const CSV_WITH_ACTUAL: &str = "\
pm_sepuluh,pm_duakomalima,sulfur_dioksida,karbon_monoksida,ozon,nitrogen_dioksida,max
50,30,12,1.5,100,35,101
70,45,20,2.0,80,40,95
";

pub const CSV_WITHOUT_ACTUAL: &str = "\
pm_sepuluh,pm_duakomalima,sulfur_dioksida,karbon_monoksida,ozon,nitrogen_dioksida
50,30,12,1.5,40,35
70,45,20,2.0,150,40
10,10,10,1.0,320,10
";

pub const CSV_MISSING_OZONE: &str = "\
pm_sepuluh,pm_duakomalima,sulfur_dioksida,karbon_monoksida,nitrogen_dioksida
50,30,12,1.5,35
";

/// Deterministic stand-in model: the index is the ozone reading.
pub struct OzoneRegressor {
    metadata: ModelMetadata,
}

impl OzoneRegressor {
    pub fn new() -> Self {
        Self {
            metadata: ModelMetadata {
                name: "ozone".to_string(),
                version: "test".to_string(),
                model_type: ModelType::Custom,
                n_features: N_FEATURES,
                feature_names: vec![],
                n_estimators: None,
            },
        }
    }
}

impl Regressor for OzoneRegressor {
    fn predict(&self, features: &Array2<f64>) -> Result<Vec<f64>> {
        Ok(features.column(4).to_vec())
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

pub fn gateway() -> ModelGateway {
    ModelGateway::new(Arc::new(OzoneRegressor::new()))
}

pub fn app() -> axum::Router {
    build_router(AppState::new(gateway()))
}

pub const BOUNDARY: &str = "----ispu-test-boundary";

/// Multipart body with one file part
pub fn multipart_file(file_name: &str, content: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    )
}

/// Multipart body with the CSV as a plain text part
pub fn multipart_text(content: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"csv\"\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    )
}
