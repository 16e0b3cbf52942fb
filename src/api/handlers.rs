use crate::api::forms::{EvaluateRequest, PredictRequest, ReadingRequest};
use crate::api::AppState;
use crate::batch::{process_csv, BatchResult, BatchSummary};
use crate::error::{AppError, Result};
use crate::export::{generate_prediction_workbook, EXPORT_FILE_NAME, XLSX_MIME};
use crate::models::{
    evaluate as evaluate_pair, reference_table, CategoryInfo, EvaluationOutcome, PollutantReading,
    SeverityCategory,
};
use crate::render::DashboardPage;
use axum::{
    extract::{rejection::FormRejection, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;
use tracing::{info, warn};

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        model: state.gateway.metadata().name.clone(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: String,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub async fn index() -> Html<String> {
    Html(DashboardPage::new().render())
}

/// Manual prediction from the dashboard form
pub async fn predict_form(
    State(state): State<AppState>,
    form: std::result::Result<Form<ReadingRequest>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let Form(request) = match form {
        Ok(form) => form,
        Err(rejection) => return form_rejected(rejection),
    };
    let page = DashboardPage::new().with_reading(request.as_reading());

    let outcome = request
        .into_reading()
        .and_then(|reading| state.gateway.predict(&reading));

    match outcome {
        Ok(prediction) => (
            StatusCode::OK,
            Html(page.with_prediction(&prediction).render()),
        ),
        Err(err) => {
            warn!(error = %err, "Manual prediction rejected");
            (
                err.status_code(),
                Html(page.with_manual_error(&err.to_string()).render()),
            )
        }
    }
}

/// Compare the last manual prediction with a measured value
pub async fn evaluate_form(
    form: std::result::Result<Form<EvaluateRequest>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let Form(request) = match form {
        Ok(form) => form,
        Err(rejection) => return form_rejected(rejection),
    };
    let mut page = DashboardPage::new();
    if let Some(reading) = request.reading() {
        page = page.with_reading(reading);
    }

    match request.check() {
        Ok(()) => {
            let outcome = evaluate_pair(request.predicted, request.actual);
            (
                StatusCode::OK,
                Html(page.with_evaluation(request.predicted, &outcome).render()),
            )
        }
        Err(err) => (
            err.status_code(),
            Html(page.with_manual_error(&err.to_string()).render()),
        ),
    }
}

/// Batch prediction over an uploaded CSV file
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let result = match read_csv_upload(multipart).await {
        Ok(csv) => process_csv(&state.gateway, csv.as_bytes()).map(|batch| (batch, csv)),
        Err(err) => Err(err),
    };

    match result {
        Ok((batch, csv)) => (
            StatusCode::OK,
            Html(DashboardPage::new().with_batch(&batch, &csv).render()),
        ),
        Err(err) => upload_failure(err),
    }
}

/// Batch prediction over an uploaded CSV file, returned as a workbook
pub async fn upload_export(State(state): State<AppState>, multipart: Multipart) -> Response {
    let workbook = match read_csv_upload(multipart).await {
        Ok(csv) => process_csv(&state.gateway, csv.as_bytes())
            .and_then(|batch| generate_prediction_workbook(&batch)),
        Err(err) => Err(err),
    };

    match workbook {
        Ok(bytes) => xlsx_response(bytes),
        Err(err) => upload_failure(err).into_response(),
    }
}

/// Undecodable form body, shown in the manual input panel
fn form_rejected(rejection: FormRejection) -> (StatusCode, Html<String>) {
    warn!(error = %rejection.body_text(), "Form body rejected");
    (
        rejection.status(),
        Html(
            DashboardPage::new()
                .with_manual_error(&rejection.body_text())
                .render(),
        ),
    )
}

fn upload_failure(err: AppError) -> (StatusCode, Html<String>) {
    warn!(error = %err, code = err.error_code(), "CSV upload failed");
    (
        err.status_code(),
        Html(
            DashboardPage::new()
                .with_upload_error(&err.upload_message())
                .render(),
        ),
    )
}

/// Pull the CSV text out of a multipart body.
///
/// Accepts either a `file` part with a `.csv` name or a `csv` text part
/// (the latter is what the export button re-posts).
async fn read_csv_upload(mut multipart: Multipart) -> Result<String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                if !file_name.to_ascii_lowercase().ends_with(".csv") {
                    return Err(AppError::Validation(format!(
                        "Only .csv files are accepted, got {file_name:?}"
                    )));
                }
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable upload: {e}")))?;
                info!(file_name = %file_name, bytes = text.len(), "CSV upload received");
                return Ok(text);
            }
            Some("csv") => {
                return field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable upload: {e}")));
            }
            _ => continue,
        }
    }

    Err(AppError::Validation("No CSV file was uploaded".to_string()))
}

fn xlsx_response(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// JSON API
// ---------------------------------------------------------------------------

/// Category reference table
pub async fn list_categories() -> Json<Vec<CategoryInfo>> {
    Json(reference_table())
}

/// Predict a single reading
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>> {
    validator::Validate::validate(&request)?;
    let reading = request.reading.into_reading()?;
    let prediction = state.gateway.predict(&reading)?;

    Ok(Json(PredictResponse {
        prediction: prediction.value,
        category: prediction.category,
        label: prediction.category.label(),
        color: prediction.category.color(),
        evaluation: request
            .actual
            .map(|actual| EvaluationResponse::new(prediction.value, prediction.evaluate(actual))),
    }))
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: f64,
    pub category: SeverityCategory,
    pub label: &'static str,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationResponse>,
}

/// Compare a prediction with its measured value
pub async fn evaluate(Json(request): Json<EvaluateRequest>) -> Result<Json<EvaluationResponse>> {
    request.check()?;
    let outcome = evaluate_pair(request.predicted, request.actual);
    Ok(Json(EvaluationResponse::new(request.predicted, outcome)))
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub predicted: f64,
    pub actual: f64,
    pub difference: f64,
    pub needs_review: bool,
    pub status: &'static str,
    pub message: &'static str,
}

impl EvaluationResponse {
    fn new(predicted: f64, outcome: EvaluationOutcome) -> Self {
        Self {
            predicted,
            actual: outcome.actual,
            difference: outcome.difference,
            needs_review: outcome.verdict.needs_review(),
            status: outcome.verdict.label(),
            message: outcome.verdict.message(),
        }
    }
}

/// Batch prediction over a CSV request body
pub async fn batch(State(state): State<AppState>, body: String) -> Result<Json<BatchResponse>> {
    let result = process_csv(&state.gateway, body.as_bytes())?;
    Ok(Json(BatchResponse::from(&result)))
}

/// Batch prediction over a CSV request body, returned as a workbook
pub async fn batch_export(State(state): State<AppState>, body: String) -> Result<Response> {
    let result = process_csv(&state.gateway, body.as_bytes())?;
    let bytes = generate_prediction_workbook(&result)?;
    Ok(xlsx_response(bytes))
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub summary: BatchSummary,
    pub rows: Vec<BatchRowResponse>,
}

#[derive(Debug, Serialize)]
pub struct BatchRowResponse {
    #[serde(flatten)]
    pub reading: PollutantReading,
    pub prediction: f64,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

impl From<&BatchResult> for BatchResponse {
    fn from(result: &BatchResult) -> Self {
        Self {
            summary: result.summary(),
            rows: result
                .rows
                .iter()
                .map(|row| BatchRowResponse {
                    reading: row.reading,
                    prediction: row.prediction.value,
                    category: row.prediction.category.label(),
                    actual: row.evaluation.map(|e| e.actual),
                    difference: row.evaluation.map(|e| e.difference),
                    status: row.evaluation.map(|e| e.verdict.label()),
                })
                .collect(),
        }
    }
}
