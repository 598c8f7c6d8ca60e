//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::stats::{StatsQuery, StatsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns click totals and a daily chart series for a short code.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Query Parameters
///
/// - `days` (optional): Days of history, 1-365 (default: 30)
///
/// # Response
///
/// ```json
/// {
///   "code": "abc1234",
///   "totalClicks": 42,
///   "clicks24h": 5,
///   "history": [{ "date": "2024-05-01", "count": 3 }]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 400 Bad Request if `days` is out of range.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    params.validate()?;

    let view = state
        .stats_service
        .get_chart_stats(&code, params.days())
        .await?
        .ok_or_else(|| AppError::not_found("Statistics not found", json!({ "code": code })))?;

    Ok(Json(StatsResponse {
        code,
        total_clicks: view.total_clicks,
        clicks_24h: view.clicks_24h,
        history: view.history,
    }))
}
