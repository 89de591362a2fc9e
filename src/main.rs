//! Addiction Score Service - HTTP entry point
//!
//! Loads the pipeline artifact at startup and serves `POST /predict`.

use addiction_score_service::{
    config::AppConfig,
    logging,
    metrics::{MetricsReporter, ServiceMetrics},
    models::inference::Predictor,
    server::{self, AppState},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;
    logging::init(&config.logging)?;

    info!("Starting Addiction Score Service");

    // Fail fast if the artifact is missing
    let predictor = Predictor::from_config(&config)
        .with_context(|| format!("Failed to load model from {}", config.model.path))?;
    info!(model = %predictor.model_name(), "Model loaded");
    let thresholds = predictor.thresholds();
    info!(
        "Category thresholds: Low<={:.2}, Moderate<={:.2}, High above",
        thresholds.low, thresholds.moderate
    );

    let metrics = Arc::new(ServiceMetrics::new());

    if config.metrics.report_interval_secs > 0 {
        let reporter = MetricsReporter::new(metrics.clone(), config.metrics.report_interval_secs);
        tokio::spawn(reporter.start());
    }

    let app = server::router(AppState::new(Some(Arc::new(predictor)), metrics.clone()));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shutting down...");
    metrics.print_summary();

    Ok(())
}
