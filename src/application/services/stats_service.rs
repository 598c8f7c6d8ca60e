//! Click recording and statistics service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::analytics::{format_history_for_chart, record_click};
use crate::domain::entities::{ClickMetadata, ClickStats, DailyCount, Link};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Statistics for one link, shaped for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStatsView {
    pub total_clicks: u64,
    pub clicks_24h: u64,
    pub history: Vec<DailyCount>,
}

/// Service for folding clicks into link statistics and reading them back.
///
/// In production, [`Self::track_click`] is called only by the click worker
/// (`click_worker`), which makes it the single writer of statistics.
pub struct StatsService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> StatsService<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Records a click at the current time.
    ///
    /// Returns `Ok(None)` when no link has this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the link changed between read and
    /// write; callers may retry.
    pub async fn track_click(
        &self,
        code: &str,
        metadata: ClickMetadata,
    ) -> Result<Option<Link>, AppError> {
        self.track_click_at(code, metadata, Utc::now()).await
    }

    /// Records a click at `now`.
    pub async fn track_click_at(
        &self,
        code: &str,
        metadata: ClickMetadata,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        let Some(mut link) = self.link_repository.find_by_code(code).await? else {
            return Ok(None);
        };

        record_click(&mut link.stats, metadata, now);

        let saved = self.link_repository.save(link).await?;
        Ok(Some(saved))
    }

    /// Returns the raw statistics for a code.
    pub async fn get_link_stats(&self, code: &str) -> Result<Option<ClickStats>, AppError> {
        Ok(self
            .link_repository
            .find_by_code(code)
            .await?
            .map(|link| link.stats))
    }

    /// Returns totals plus a dense daily series for the last `days` days.
    pub async fn get_chart_stats(
        &self,
        code: &str,
        days: u32,
    ) -> Result<Option<LinkStatsView>, AppError> {
        let today = Utc::now().date_naive();

        Ok(self.get_link_stats(code).await?.map(|stats| LinkStatsView {
            total_clicks: stats.total_clicks,
            clicks_24h: stats.clicks_24h,
            history: format_history_for_chart(&stats.clicks_history, days, today),
        }))
    }
}
