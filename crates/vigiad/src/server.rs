//! HTTP server for vigiad

use crate::classifier::HttpClassifier;
use crate::config::Config;
use crate::evaluator::DecisionEvaluator;
use crate::routes;
use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
pub struct AppState {
    pub evaluator: DecisionEvaluator,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(evaluator: DecisionEvaluator) -> Self {
        Self {
            evaluator,
            start_time: Instant::now(),
        }
    }
}

/// Build the router with all routes and layers
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(routes::analyze_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let classifier = HttpClassifier::new(&config.classifier)?;
    info!(
        "  Classifier: {} (timeout {}s)",
        classifier.endpoint(),
        config.classifier.timeout_secs
    );

    let evaluator =
        DecisionEvaluator::new(Arc::new(classifier)).with_timeout(config.classifier.timeout());
    let app = router(AppState::new(evaluator), config.server.max_body_bytes);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully");
}
