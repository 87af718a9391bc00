//! API routes for vigiad

use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::info;
use vigia_shared::{AnalysisRequest, Decision, ValidationError};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Analyze Routes
// ============================================================================

pub fn analyze_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/analyze", post(analyze))
        .route("/analyze", post(analyze))
}

/// Always 200 with a decision, unless the input itself is unusable.
async fn analyze(
    State(state): State<AppStateArc>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Decision>, InputRejection> {
    let Json(body) = payload.map_err(InputRejection::from)?;
    let request = AnalysisRequest::from_json(&body).map_err(InputRejection::invalid)?;

    Ok(Json(state.evaluator.decide(request).await))
}

/// Structured client error for unusable input
#[derive(Debug)]
pub struct InputRejection {
    status: StatusCode,
    error: ValidationError,
}

impl InputRejection {
    fn invalid(error: ValidationError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error,
        }
    }
}

impl From<JsonRejection> for InputRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            error: ValidationError::Unreadable(rejection.body_text()),
        }
    }
}

impl IntoResponse for InputRejection {
    fn into_response(self) -> Response {
        info!("Rejected analysis request ({}): {}", self.status, self.error);
        let message = self.error.to_string();
        let field = self.error.field().unwrap_or("body");
        let mut errors = Map::new();
        errors.insert(field.to_string(), json!([message]));
        let body = json!({
            "message": message,
            "errors": errors,
        });
        (self.status, Json(body)).into_response()
    }
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
