//! Experiment record endpoints (`/api/experiments`).

use super::{blocking, parse_date, ApiError, AppState};
use crate::db::records::Records;
use crate::libs::messages::Message;
use crate::libs::pagination::{Page, PageRequest};
use crate::libs::record::{Record, RecordFilter, RecordInput};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub(super) struct RecordListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    search: Option<String>,
    experiment_type: Option<String>,
    mouse_id: Option<i64>,
    start_date: Option<String>,
    end_date: Option<String>,
}

/// `GET /api/experiments` — filtered, paginated record listing.
pub(super) async fn list(State(state): State<Arc<AppState>>, Query(params): Query<RecordListQuery>) -> Result<Json<Page<Record>>, ApiError> {
    let db_path = state.db_path.clone();
    let page = PageRequest::new(params.page, params.limit);
    let filter = RecordFilter {
        search: params.search,
        kind: params.experiment_type,
        subject_id: params.mouse_id,
        start_date: parse_date(params.start_date.as_deref())?,
        end_date: parse_date(params.end_date.as_deref())?,
    };
    let result = blocking(move || Records::new(&db_path)?.fetch_page(&filter, page)).await?;
    Ok(Json(result))
}

/// `GET /api/experiments/{id}` — single record with subject info.
pub(super) async fn get(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<Json<Record>, ApiError> {
    let db_path = state.db_path.clone();
    let record = blocking(move || Records::new(&db_path)?.get(id)).await?;
    Ok(Json(record))
}

/// `POST /api/experiments` — create a record.
pub(super) async fn create(State(state): State<Arc<AppState>>, Json(input): Json<RecordInput>) -> Result<(StatusCode, Json<Value>), ApiError> {
    let db_path = state.db_path.clone();
    let id = blocking(move || Records::new(&db_path)?.create(&input)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": id, "message": Message::RecordCreated(id).to_string() })),
    ))
}

/// `PUT /api/experiments/{id}` — full-record update.
pub(super) async fn update(State(state): State<Arc<AppState>>, Path(id): Path<i64>, Json(input): Json<RecordInput>) -> Result<Json<Value>, ApiError> {
    let db_path = state.db_path.clone();
    blocking(move || Records::new(&db_path)?.update(id, &input)).await?;
    Ok(Json(json!({ "message": Message::RecordUpdated(id).to_string() })))
}

/// `DELETE /api/experiments/{id}`.
pub(super) async fn remove(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<Json<Value>, ApiError> {
    let db_path = state.db_path.clone();
    blocking(move || Records::new(&db_path)?.delete(id)).await?;
    Ok(Json(json!({ "message": Message::RecordDeleted(id).to_string() })))
}

#[derive(Deserialize)]
pub(super) struct BatchDeleteRequest {
    #[serde(default)]
    ids: Vec<i64>,
}

/// `POST /api/experiments/batch-delete` — delete a set of records.
///
/// An empty id list is rejected with a validation error; the response
/// reports how many rows were actually removed.
pub(super) async fn batch_delete(State(state): State<Arc<AppState>>, Json(request): Json<BatchDeleteRequest>) -> Result<Json<Value>, ApiError> {
    let db_path = state.db_path.clone();
    let deleted = blocking(move || Records::new(&db_path)?.delete_many(&request.ids)).await?;
    Ok(Json(json!({
        "message": Message::RecordsDeletedCount(deleted).to_string(),
        "deletedCount": deleted,
    })))
}
