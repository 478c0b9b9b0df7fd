//! Aggregate statistics endpoints (`/api/stats`).
//!
//! Every endpoint recomputes from live store state; nothing is cached.

use super::{blocking, ApiError, AppState};
use crate::db::stats::{DistributionSlice, KindCount, MonthBucket, Overview, Stats, WeightPoint};
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

/// `GET /api/stats/overview` — colony overview counters.
pub(super) async fn overview(State(state): State<Arc<AppState>>) -> Result<Json<Overview>, ApiError> {
    let db_path = state.db_path.clone();
    let overview = blocking(move || Stats::new(&db_path)?.overview()).await?;
    Ok(Json(overview))
}

/// `GET /api/stats/strain-distribution`.
pub(super) async fn strain_distribution(State(state): State<Arc<AppState>>) -> Result<Json<Vec<DistributionSlice>>, ApiError> {
    let db_path = state.db_path.clone();
    let slices = blocking(move || Stats::new(&db_path)?.strain_distribution()).await?;
    Ok(Json(slices))
}

/// `GET /api/stats/gender-distribution`.
pub(super) async fn gender_distribution(State(state): State<Arc<AppState>>) -> Result<Json<Vec<DistributionSlice>>, ApiError> {
    let db_path = state.db_path.clone();
    let slices = blocking(move || Stats::new(&db_path)?.gender_distribution()).await?;
    Ok(Json(slices))
}

/// `GET /api/stats/experiment-types` — record counts by type, descending.
pub(super) async fn experiment_types(State(state): State<Arc<AppState>>) -> Result<Json<Vec<KindCount>>, ApiError> {
    let db_path = state.db_path.clone();
    let counts = blocking(move || Stats::new(&db_path)?.kind_distribution()).await?;
    Ok(Json(counts))
}

/// `GET /api/stats/monthly-trend` — sparse year-month buckets, ascending.
pub(super) async fn monthly_trend(State(state): State<Arc<AppState>>) -> Result<Json<Vec<MonthBucket>>, ApiError> {
    let db_path = state.db_path.clone();
    let buckets = blocking(move || Stats::new(&db_path)?.monthly_trend()).await?;
    Ok(Json(buckets))
}

/// `GET /api/stats/mouse-weight/{id}` — weight series for one subject.
pub(super) async fn weight_history(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<Json<Vec<WeightPoint>>, ApiError> {
    let db_path = state.db_path.clone();
    let points = blocking(move || Stats::new(&db_path)?.weight_history(id)).await?;
    Ok(Json(points))
}
