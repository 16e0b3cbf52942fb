use crate::api::{handlers, AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the dashboard and JSON API router
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.body_limit;

    Router::new()
        // Dashboard
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict_form))
        .route("/evaluate", post(handlers::evaluate_form))
        .route("/upload", post(handlers::upload))
        .route("/upload/export", post(handlers::upload_export))
        // Health endpoints
        .route("/health", get(handlers::health_check))
        // JSON API
        .route("/v1/categories", get(handlers::list_categories))
        .route("/v1/predict", post(handlers::predict))
        .route("/v1/evaluate", post(handlers::evaluate))
        .route("/v1/batch", post(handlers::batch))
        .route("/v1/batch/export", post(handlers::batch_export))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
