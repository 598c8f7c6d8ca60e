//! Handlers for data export and import.

use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use chrono::Utc;

use crate::api::dto::backup::ImportResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Downloads every link and the settings as one JSON document.
///
/// # Endpoint
///
/// `GET /api/export`
///
/// The response is served as an attachment named
/// `splitlink-export-YYYY-MM-DD.json`.
pub async fn export_handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state.backup_service.export_json().await?;

    let disposition = format!(
        "attachment; filename=\"splitlink-export-{}.json\"",
        Utc::now().format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// Replaces stored data with an export document.
///
/// # Endpoint
///
/// `POST /api/import`
///
/// The body is the raw export JSON. `links` and `settings` are each optional;
/// a missing section keeps the current data.
///
/// # Errors
///
/// Returns 400 if the document is malformed or has duplicate short codes.
pub async fn import_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let summary = state.backup_service.import_json(&body).await?;
    Ok(Json(summary.into()))
}
