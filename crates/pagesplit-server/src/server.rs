//! HTTP request/reply boundary.
//!
//! `POST /api/scrape` with `{ "url": "..." }` returns the full
//! [`ExtractionResult`]; failures return `{ "error", "details" }`.

use crate::audit::{AuditEvent, AuditLogger};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pagesplit::error::INPUT_CATEGORY;
use pagesplit::{ExtractionRequest, ExtractionResult, SplitError, Splitter};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Shared, read-only state. Each request builds its own tree and fragments.
#[derive(Clone)]
pub struct AppState {
    splitter: Splitter,
    audit: Option<Arc<Mutex<AuditLogger>>>,
}

impl AppState {
    pub fn new(splitter: Splitter, audit: Option<AuditLogger>) -> Self {
        Self {
            splitter,
            audit: audit.map(|a| Arc::new(Mutex::new(a))),
        }
    }

    fn audit(&self, event: AuditEvent) {
        let Some(audit) = &self.audit else {
            return;
        };
        match audit.lock() {
            Ok(mut logger) => {
                if let Err(e) = logger.log(&event) {
                    warn!("failed to write audit event: {e}");
                }
            }
            Err(_) => warn!("audit logger mutex poisoned"),
        }
    }
}

/// Body of every failure response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("malformed request body: {0}")]
    BadBody(String),
    #[error(transparent)]
    Split(#[from] SplitError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Split(e) if e.is_input() => StatusCode::BAD_REQUEST,
            ApiError::Split(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::MethodNotAllowed => ErrorBody {
                error: self.to_string(),
                details: None,
            },
            ApiError::BadBody(details) => ErrorBody {
                error: INPUT_CATEGORY.to_string(),
                details: Some(details.clone()),
            },
            ApiError::Split(e) if e.is_input() => ErrorBody {
                error: e.category().to_string(),
                details: None,
            },
            ApiError::Split(e) => ErrorBody {
                error: e.category().to_string(),
                details: Some(e.details()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/scrape", post(scrape).fallback(method_not_allowed))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn scrape(
    State(state): State<AppState>,
    payload: Result<Json<ExtractionRequest>, JsonRejection>,
) -> Result<Json<ExtractionResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadBody(e.body_text()))?;
    let url = request.url.clone().unwrap_or_default();
    let started = Instant::now();

    let outcome = state.splitter.split(&request).await;
    let elapsed = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(result) => {
            info!(%url, elapsed_ms = elapsed, "scrape ok");
            state.audit(AuditEvent::new("scrape", &url, elapsed, "ok").with_stats(result.stats));
            Ok(Json(result))
        }
        Err(err) => {
            let status = if err.is_input() { "input_error" } else { "fetch_error" };
            warn!(%url, error = %err, "scrape failed");
            state.audit(AuditEvent::new("scrape", &url, elapsed, status).with_error(err.details()));
            Err(err.into())
        }
    }
}
