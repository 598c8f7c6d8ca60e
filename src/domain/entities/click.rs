//! Click statistics attached to every link.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary metadata recorded with a click (selected variant, user agent, ...).
pub type ClickMetadata = Map<String, Value>;

/// Aggregated click statistics for a link.
///
/// `clicks_history` is sparse: only days with at least one click are stored.
/// `click_timestamps` holds raw click records for the retention window and
/// exists to derive `clicks_24h`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickStats {
    #[serde(default)]
    pub total_clicks: u64,
    #[serde(default)]
    pub clicks_24h: u64,
    #[serde(default)]
    pub clicks_history: Vec<DailyCount>,
    #[serde(default)]
    pub click_timestamps: Vec<ClickRecord>,
}

/// Number of clicks on a single UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// A single recorded click with its caller-supplied metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub metadata: ClickMetadata,
}

/// Metadata key reserved for [`ClickRecord::timestamp`] once flattened.
const TIMESTAMP_KEY: &str = "timestamp";

/// Where a caller-supplied `timestamp` metadata value is kept.
pub const CLIENT_TIMESTAMP_KEY: &str = "clientTimestamp";

impl ClickRecord {
    /// Builds a record. A `timestamp` key in `metadata` would collide with the
    /// record time when flattened, so it is moved to [`CLIENT_TIMESTAMP_KEY`].
    pub fn new(timestamp: DateTime<Utc>, mut metadata: ClickMetadata) -> Self {
        if let Some(client_time) = metadata.remove(TIMESTAMP_KEY) {
            metadata.insert(CLIENT_TIMESTAMP_KEY.to_string(), client_time);
        }

        Self {
            timestamp,
            metadata,
        }
    }
}
