//! Link entity representing a short code mapped to a destination URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::click::ClickStats;

/// A shortened link with its routing configuration and click statistics.
///
/// Serialized with camelCase field names, which is also the layout used by
/// exported snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default)]
    pub custom_domain: Option<String>,
    #[serde(default)]
    pub utm_params: Option<UtmParams>,
    #[serde(default)]
    pub ab_tests: Option<Vec<Variant>>,
    #[serde(default)]
    pub stats: ClickStats,
    /// Optimistic-concurrency counter, bumped by the store on every save.
    #[serde(default)]
    pub revision: u64,
}

impl Link {
    /// Creates an active link with empty statistics and no routing extras.
    pub fn new(
        id: String,
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            created_at,
            is_active: true,
            custom_domain: None,
            utm_params: None,
            ab_tests: None,
            stats: ClickStats::default(),
            revision: 0,
        }
    }

    /// Returns the A/B variants when at least one is configured.
    pub fn variants(&self) -> Option<&[Variant]> {
        self.ab_tests.as_deref().filter(|v| !v.is_empty())
    }
}

/// One weighted destination of an A/B test.
///
/// `weight` is in percentage points but need not sum to 100 across variants;
/// selection normalizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub url: String,
    pub weight: f64,
}

impl Variant {
    pub fn new(url: impl Into<String>, weight: f64) -> Self {
        Self {
            url: url.into(),
            weight,
        }
    }
}

/// Campaign-tracking parameters appended to the destination on redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    #[serde(default, alias = "source", skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(default, alias = "medium", skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(default, alias = "campaign", skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(default, alias = "term", skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    #[serde(default, alias = "content", skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
}

impl UtmParams {
    /// Returns true when no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// Trims every value and drops the blank ones.
    pub fn cleaned(self) -> Self {
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        Self {
            utm_source: clean(self.utm_source),
            utm_medium: clean(self.utm_medium),
            utm_campaign: clean(self.utm_campaign),
            utm_term: clean(self.utm_term),
            utm_content: clean(self.utm_content),
        }
    }

    /// Set parameters as `(query name, value)` pairs in canonical order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("utm_source", &self.utm_source),
            ("utm_medium", &self.utm_medium),
            ("utm_campaign", &self.utm_campaign),
            ("utm_term", &self.utm_term),
            ("utm_content", &self.utm_content),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub original_url: String,
    pub custom_code: Option<String>,
    pub utm_params: Option<UtmParams>,
    pub ab_tests: Option<Vec<Variant>>,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged. For clearable fields, `Some(None)`
/// clears the value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub original_url: Option<String>,
    pub utm_params: Option<Option<UtmParams>>,
    pub ab_tests: Option<Option<Vec<Variant>>>,
    pub is_active: Option<bool>,
    pub custom_domain: Option<Option<String>>,
}
