//! Pure click-analytics functions: rolling window, daily rollup, retention.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::entities::{ClickMetadata, ClickRecord, ClickStats, DailyCount};

/// Raw click records older than this are pruned on every write.
pub const CLICK_RETENTION_DAYS: i64 = 90;

/// Width of the rolling window behind `clicks_24h`.
pub const ROLLING_WINDOW_HOURS: i64 = 24;

/// Default number of days shown by [`format_history_for_chart`].
pub const DEFAULT_CHART_DAYS: u32 = 30;

/// Counts records strictly younger than [`ROLLING_WINDOW_HOURS`].
pub fn calculate_clicks_24h(records: &[ClickRecord], now: DateTime<Utc>) -> u64 {
    let window = Duration::hours(ROLLING_WINDOW_HOURS);
    records
        .iter()
        .filter(|r| now - r.timestamp < window)
        .count() as u64
}

/// Expands sparse history into a dense, oldest-first series of `days` entries
/// ending at `today`, with zero counts for days without clicks.
pub fn format_history_for_chart(
    history: &[DailyCount],
    days: u32,
    today: NaiveDate,
) -> Vec<DailyCount> {
    (0..i64::from(days))
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let count = history
                .iter()
                .find(|entry| entry.date == date)
                .map_or(0, |entry| entry.count);
            DailyCount { date, count }
        })
        .collect()
}

/// Applies one click to `stats` at `now`.
///
/// Bumps the total, stores the record, rolls it into today's UTC bucket,
/// recomputes the 24h window and drops records past retention.
pub fn record_click(stats: &mut ClickStats, metadata: ClickMetadata, now: DateTime<Utc>) {
    stats.total_clicks += 1;
    stats.click_timestamps.push(ClickRecord::new(now, metadata));

    let today = now.date_naive();
    match stats.clicks_history.iter_mut().find(|e| e.date == today) {
        Some(entry) => entry.count += 1,
        None => stats.clicks_history.push(DailyCount {
            date: today,
            count: 1,
        }),
    }

    stats.clicks_24h = calculate_clicks_24h(&stats.click_timestamps, now);

    let cutoff = now - Duration::days(CLICK_RETENTION_DAYS);
    stats.click_timestamps.retain(|r| r.timestamp >= cutoff);
}
