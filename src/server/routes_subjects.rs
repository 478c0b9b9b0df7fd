//! Subject endpoints (`/api/mice`).

use super::{blocking, ApiError, AppState};
use crate::db::records::Records;
use crate::db::subjects::Subjects;
use crate::libs::messages::Message;
use crate::libs::pagination::{Page, PageRequest};
use crate::libs::record::Record;
use crate::libs::subject::{Subject, SubjectFilter, SubjectInput};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub(super) struct SubjectListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    search: Option<String>,
    status: Option<String>,
    gender: Option<String>,
    strain: Option<String>,
}

/// `GET /api/mice` — filtered, paginated subject listing.
pub(super) async fn list(State(state): State<Arc<AppState>>, Query(params): Query<SubjectListQuery>) -> Result<Json<Page<Subject>>, ApiError> {
    let db_path = state.db_path.clone();
    let page = PageRequest::new(params.page, params.limit);
    let filter = SubjectFilter {
        search: params.search,
        status: params.status,
        gender: params.gender,
        strain: params.strain,
    };
    let result = blocking(move || Subjects::new(&db_path)?.fetch_page(&filter, page)).await?;
    Ok(Json(result))
}

/// `GET /api/mice/{id}` — single subject.
pub(super) async fn get(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<Json<Subject>, ApiError> {
    let db_path = state.db_path.clone();
    let subject = blocking(move || Subjects::new(&db_path)?.get(id)).await?;
    Ok(Json(subject))
}

/// `POST /api/mice` — create a subject.
pub(super) async fn create(State(state): State<Arc<AppState>>, Json(input): Json<SubjectInput>) -> Result<(StatusCode, Json<Value>), ApiError> {
    let db_path = state.db_path.clone();
    let id = blocking(move || Subjects::new(&db_path)?.create(&input)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": id, "message": Message::SubjectCreated(id).to_string() })),
    ))
}

/// `PUT /api/mice/{id}` — full-record update.
pub(super) async fn update(State(state): State<Arc<AppState>>, Path(id): Path<i64>, Json(input): Json<SubjectInput>) -> Result<Json<Value>, ApiError> {
    let db_path = state.db_path.clone();
    blocking(move || Subjects::new(&db_path)?.update(id, &input)).await?;
    Ok(Json(json!({ "message": Message::SubjectUpdated(id).to_string() })))
}

/// `DELETE /api/mice/{id}` — delete the subject and, by cascade, its records.
pub(super) async fn remove(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<Json<Value>, ApiError> {
    let db_path = state.db_path.clone();
    blocking(move || Subjects::new(&db_path)?.delete(id)).await?;
    Ok(Json(json!({ "message": Message::SubjectDeleted(id).to_string() })))
}

/// `GET /api/mice/{id}/experiments` — all records of one subject.
pub(super) async fn records(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<Json<Vec<Record>>, ApiError> {
    let db_path = state.db_path.clone();
    let records = blocking(move || Records::new(&db_path)?.for_subject(id)).await?;
    Ok(Json(records))
}
