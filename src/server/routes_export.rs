//! Export endpoints (`/api/export`).
//!
//! Both endpoints fetch the unpaginated row set for the posted filter and
//! respond with the rendered file bytes as an attachment. The same buffer
//! renderers back the CLI export command.

use super::{blocking, parse_date, ApiError, AppState};
use crate::db::records::Records;
use crate::libs::export;
use crate::libs::record::ExportFilter;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub(super) struct ExportRequest {
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    mouse_ids: Vec<i64>,
    #[serde(default)]
    experiment_types: Vec<String>,
}

impl ExportRequest {
    fn into_filter(self) -> Result<ExportFilter, ApiError> {
        Ok(ExportFilter {
            start_date: parse_date(self.start_date.as_deref())?,
            end_date: parse_date(self.end_date.as_deref())?,
            subject_ids: self.mouse_ids,
            kinds: self.experiment_types,
        })
    }
}

/// `POST /api/export/excel` — filtered records as an Excel workbook.
pub(super) async fn excel(State(state): State<Arc<AppState>>, Json(request): Json<ExportRequest>) -> Result<Response, ApiError> {
    let filter = request.into_filter()?;
    let db_path = state.db_path.clone();
    let bytes = blocking(move || -> anyhow::Result<Vec<u8>> {
        let records = Records::new(&db_path)?.fetch_filtered(&filter)?;
        export::xlsx_bytes(&records)
    })
    .await?;
    Ok(attachment(bytes, "xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"))
}

/// `POST /api/export/csv` — filtered records as a CSV table.
pub(super) async fn csv(State(state): State<Arc<AppState>>, Json(request): Json<ExportRequest>) -> Result<Response, ApiError> {
    let filter = request.into_filter()?;
    let db_path = state.db_path.clone();
    let bytes = blocking(move || -> anyhow::Result<Vec<u8>> {
        let records = Records::new(&db_path)?.fetch_filtered(&filter)?;
        export::csv_bytes(&records)
    })
    .await?;
    Ok(attachment(bytes, "csv", "text/csv"))
}

fn attachment(bytes: Vec<u8>, extension: &str, content_type: &str) -> Response {
    let filename = format!("experiment_records_{}.{}", Local::now().format("%Y%m%d"), extension);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        bytes,
    )
        .into_response()
}
