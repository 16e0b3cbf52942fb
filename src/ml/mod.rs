//! Model gateway: loads a pre-trained ISPU regressor and runs inference.
//!
//! The artifact is produced elsewhere and consumed as-is:
//! - Random forest ensembles in scikit-learn's tree array layout
//! - Linear models (coefficients + intercept)
//!
//! Everything else in the crate depends only on `Regressor`, so tests can
//! inject a deterministic stub.

pub mod artifact;
pub mod forest;
pub mod gateway;
pub mod linear;
pub mod models;
pub mod regressor;

pub use artifact::{Estimator, ModelArtifact};
pub use forest::{RandomForestRegressor, RegressionTree};
pub use gateway::ModelGateway;
pub use linear::LinearRegressor;
pub use models::{ModelMetadata, ModelType};
pub use regressor::Regressor;
