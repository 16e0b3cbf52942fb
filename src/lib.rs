//! ISPU air-quality prediction.
//!
//! Loads a pre-trained regressor, predicts the ISPU index for single
//! readings or CSV batches, buckets the result into the five health
//! categories and optionally compares it with a measured value. The
//! results are served as an HTML dashboard, a JSON API and an Excel
//! export.

pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod ml;
pub mod models;
pub mod render;

pub use error::{AppError, Result};
