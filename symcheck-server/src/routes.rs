//! HTTP routes and handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use symcheck_engine::{AnswerEngine, EngineError};

use crate::ui;

/// Overall per-request deadline. The engine performs two sequential
/// blocking network calls per invocation and configures no timeout of its
/// own; expiry is a request failure, not a process failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared application state: the one built, immutable engine handle.
#[derive(Clone)]
pub struct AppState {
    /// The process-lifetime answer engine.
    pub engine: Arc<AnswerEngine>,
}

/// One advice submission.
#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    /// Free-text symptom description.
    pub symptoms: String,
}

/// A successful advice response.
#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    /// The model's text, returned verbatim.
    pub advice: String,
}

/// A human-readable error for the UI.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// What went wrong with this submission.
    pub error: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/advice", post(advice))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

/// GET /
async fn index() -> Html<&'static str> {
    Html(ui::INDEX_HTML)
}

/// POST /api/advice
///
/// Blank input is rejected here, before the engine is invoked, so no
/// outbound call is made for an empty submission. Upstream failures are
/// local to the request; the cached index is unaffected and the user can
/// re-submit.
async fn advice(
    State(state): State<AppState>,
    Json(request): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.symptoms.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "Please enter some symptoms."));
    }

    match state.engine.answer(&request.symptoms).await {
        Ok(advice) => Ok(Json(AdviceResponse { advice })),
        Err(e @ EngineError::InvalidInput(_)) => {
            Err(reject(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => {
            error!(error = %e, "advice request failed");
            Err(reject(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

fn reject(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error: message.into() }))
}
