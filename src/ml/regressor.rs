use crate::error::Result;
use crate::ml::models::ModelMetadata;
use ndarray::Array2;

/// A pre-trained regression model.
///
/// Implementations only run inference. Rows of `features` follow the
/// column order reported by [`ModelMetadata::feature_names`].
pub trait Regressor: Send + Sync {
    /// Predict one value per row
    fn predict(&self, features: &Array2<f64>) -> Result<Vec<f64>>;

    /// Get model metadata
    fn metadata(&self) -> &ModelMetadata;
}
