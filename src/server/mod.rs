//! HTTP transport for the browser interface.
//!
//! A thin axum layer over the core: route handlers map the wire parameter
//! names (`mouse_id`, `experiment_type`, `start_date`, ...) onto the filter
//! criteria, run the blocking SQLite work on the tokio blocking pool, and
//! serialize core outputs to JSON. List endpoints use the
//! `{ data, pagination }` envelope; error kinds map to status codes
//! (validation 400, not-found 404, conflict 409, store 500 with the detail
//! logged rather than leaked).
//!
//! Concurrent writers to the same row race at store granularity
//! (last-write-wins on update); acceptable for single-operator lab usage.

mod routes_export;
mod routes_records;
mod routes_stats;
mod routes_subjects;

use crate::libs::error::Error;
use crate::libs::messages::Message;
use crate::msg_info;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub db_path: PathBuf,
}

/// Binds the listener and serves requests until the process is stopped.
pub async fn run(db_path: PathBuf, host: &str, port: u16) -> anyhow::Result<()> {
    let state = Arc::new(AppState { db_path });
    let app = router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    msg_info!(Message::ServerListening(addr.to_string()));
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/mice", get(routes_subjects::list).post(routes_subjects::create))
        .route(
            "/api/mice/{id}",
            get(routes_subjects::get).put(routes_subjects::update).delete(routes_subjects::remove),
        )
        .route("/api/mice/{id}/experiments", get(routes_subjects::records))
        .route("/api/experiments", get(routes_records::list).post(routes_records::create))
        .route("/api/experiments/batch-delete", post(routes_records::batch_delete))
        .route(
            "/api/experiments/{id}",
            get(routes_records::get).put(routes_records::update).delete(routes_records::remove),
        )
        .route("/api/stats/overview", get(routes_stats::overview))
        .route("/api/stats/strain-distribution", get(routes_stats::strain_distribution))
        .route("/api/stats/gender-distribution", get(routes_stats::gender_distribution))
        .route("/api/stats/experiment-types", get(routes_stats::experiment_types))
        .route("/api/stats/monthly-trend", get(routes_stats::monthly_trend))
        .route("/api/stats/mouse-weight/{id}", get(routes_stats::weight_history))
        .route("/api/export/excel", post(routes_export::excel))
        .route("/api/export/csv", post(routes_export::csv))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Local::now().to_rfc3339(),
    }))
}

/// Transport-level error: a response status plus a safe message.
pub(super) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal error".to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, message) = match &err {
            Error::Validation(m) => (StatusCode::BAD_REQUEST, m.to_string()),
            Error::Conflict(m) => (StatusCode::CONFLICT, m.to_string()),
            Error::NotFound(m) => (StatusCode::NOT_FOUND, m.to_string()),
            Error::Store(e) => {
                tracing::error!(error = %e, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal storage error".to_string())
            }
        };
        Self { status, message }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(err) => err.into(),
            Err(err) => {
                tracing::error!(error = %err, "request failed");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

/// Runs one store operation on the blocking pool. A request performs its
/// store work as a single cancelable blocking task.
pub(super) async fn blocking<T, E, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(Into::into),
        Err(err) => {
            tracing::error!(error = %err, "blocking task failed");
            Err(ApiError::internal())
        }
    }
}

/// Parses an optional `YYYY-MM-DD` query or body value; blank means absent.
pub(super) fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| Error::Validation(Message::InvalidDate(raw.to_string())).into()),
    }
}
