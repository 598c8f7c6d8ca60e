//! Background worker that folds queued clicks into link statistics.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::application::services::StatsService;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const RETRY_BASE_MILLIS: u64 = 10;
const RETRY_MAX_DELAY: Duration = Duration::from_millis(500);

/// Consumes click events until every sender is dropped.
///
/// This task is the only writer of click statistics. Each event is applied
/// with up to `retry_attempts` tries; conflicts and storage errors are
/// retried with jittered exponential backoff, anything else is logged and
/// the event is dropped.
pub async fn run_click_worker<L>(
    mut rx: mpsc::Receiver<ClickEvent>,
    stats_service: Arc<StatsService<L>>,
    retry_attempts: usize,
) where
    L: LinkRepository + 'static,
{
    tracing::info!(retry_attempts, "Click worker started");

    while let Some(event) = rx.recv().await {
        process_click(&stats_service, &event, retry_attempts).await;
    }

    tracing::info!("Click worker stopped");
}

async fn process_click<L: LinkRepository>(
    stats_service: &StatsService<L>,
    event: &ClickEvent,
    retry_attempts: usize,
) {
    let strategy = ExponentialBackoff::from_millis(RETRY_BASE_MILLIS)
        .max_delay(RETRY_MAX_DELAY)
        .map(jitter)
        .take(retry_attempts.saturating_sub(1));

    let result = RetryIf::spawn(
        strategy,
        || stats_service.track_click(&event.code, event.metadata.clone()),
        |e: &AppError| {
            let retry = e.is_transient();
            if retry {
                tracing::warn!(code = %event.code, error = %e, "Retrying click write");
            }
            retry
        },
    )
    .await;

    match result {
        Ok(Some(link)) => {
            metrics::counter!("clicks_recorded_total").increment(1);
            tracing::debug!(
                code = %event.code,
                total_clicks = link.stats.total_clicks,
                "Click recorded"
            );
        }
        Ok(None) => {
            tracing::debug!(code = %event.code, "Click for unknown code ignored");
        }
        Err(e) => {
            tracing::error!(code = %event.code, error = %e, "Failed to record click");
        }
    }
}
