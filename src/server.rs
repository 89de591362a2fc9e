//! HTTP surface: `POST /predict`, plus health and metrics endpoints

use crate::collector::{InputCollector, PayloadSource};
use crate::metrics::{MetricsSnapshot, ServiceMetrics};
use crate::models::inference::Predictor;
use crate::types::response::PredictResponse;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

/// Shared handler state.
///
/// The predictor is injected once at startup; `None` means no model is
/// loaded and every well-formed prediction request is answered with a
/// `status_code: 500` body.
#[derive(Clone)]
pub struct AppState {
    predictor: Option<Arc<Predictor>>,
    metrics: Arc<ServiceMetrics>,
}

impl AppState {
    pub fn new(predictor: Option<Arc<Predictor>>, metrics: Arc<ServiceMetrics>) -> Self {
        Self { predictor, metrics }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn predict(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<PredictResponse>) {
    let start_time = Instant::now();

    // Schema violations are rejected before the model is consulted
    let input = match PayloadSource::new(&body).collect() {
        Ok(input) => input,
        Err(e) => {
            state.metrics.record_failure();
            debug!(error = %e, "Rejected request body");
            return respond(PredictResponse::failure(422, e.to_string()));
        }
    };

    // Reported in the body only; the HTTP exchange itself succeeds
    let Some(predictor) = state.predictor.as_ref() else {
        state.metrics.record_failure();
        warn!("Prediction requested before a model was loaded");
        return (StatusCode::OK, Json(PredictResponse::model_not_loaded()));
    };

    match predictor.predict_one(&input) {
        Ok(prediction) => {
            let latency = start_time.elapsed();
            state
                .metrics
                .record_prediction(latency, prediction.score, prediction.category);
            debug!(
                score = prediction.score,
                category = %prediction.category,
                latency_us = latency.as_micros() as u64,
                "Prediction served"
            );
            respond(PredictResponse::success(&prediction))
        }
        Err(e) => {
            state.metrics.record_failure();
            error!(error = %e, "Prediction failed");
            respond(PredictResponse::failure(500, e.to_string()))
        }
    }
}

fn respond(body: PredictResponse) -> (StatusCode, Json<PredictResponse>) {
    let status =
        StatusCode::from_u16(body.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_loaded: state.predictor.is_some(),
    })
}

async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
