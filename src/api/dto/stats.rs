//! DTOs for link statistics.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::analytics::DEFAULT_CHART_DAYS;
use crate::domain::entities::DailyCount;

/// Query parameters for `GET /api/stats/{code}`.
#[derive(Debug, Deserialize, Validate)]
pub struct StatsQuery {
    /// Days of history to return (default: 30).
    #[validate(range(min = 1, max = 365, message = "days must be between 1 and 365"))]
    pub days: Option<u32>,
}

impl StatsQuery {
    pub fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_CHART_DAYS)
    }
}

/// Click totals plus a dense, oldest-first daily series.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub code: String,
    pub total_clicks: u64,
    #[serde(rename = "clicks24h")]
    pub clicks_24h: u64,
    pub history: Vec<DailyCount>,
}
