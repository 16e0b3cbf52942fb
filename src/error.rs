use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The model artifact could not be read or is structurally invalid
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required CSV columns are absent
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Upload has a header but no data rows
    #[error("File is empty or has no data rows")]
    EmptyFile,

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required cell is empty or not a number
    #[error("Invalid value {value:?} in column '{column}' at line {line}")]
    InvalidValue {
        line: usize,
        column: String,
        value: String,
    },

    /// The regressor failed or returned a malformed result
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Spreadsheet export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MissingColumns(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmptyFile => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Csv(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidValue { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ModelLoad(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::ModelLoad(_) => "MODEL_LOAD_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::MissingColumns(_) => "MISSING_COLUMNS",
            AppError::EmptyFile => "EMPTY_FILE",
            AppError::Csv(_) => "CSV_ERROR",
            AppError::InvalidValue { .. } => "INVALID_VALUE",
            AppError::Prediction(_) => "PREDICTION_ERROR",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for errors caused by the uploaded file rather than the service
    pub fn is_upload_error(&self) -> bool {
        matches!(
            self,
            AppError::MissingColumns(_)
                | AppError::EmptyFile
                | AppError::Csv(_)
                | AppError::InvalidValue { .. }
                | AppError::Validation(_)
        )
    }

    /// Single user-facing message for a failed batch upload
    pub fn upload_message(&self) -> String {
        format!("Gagal memproses karena: {}", self)
    }
}

/// Convert AppError to HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        tracing::error!(
            error_code = error_code,
            status_code = status.as_u16(),
            message = %message,
            "Request error"
        );

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Conversion from rust_xlsxwriter::XlsxError
impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Export(err.to_string())
    }
}

/// Conversion from ndarray::ShapeError
impl From<ndarray::ShapeError> for AppError {
    fn from(err: ndarray::ShapeError) -> Self {
        AppError::Prediction(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
