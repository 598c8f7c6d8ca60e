//! Settings entity holding domain configuration for short URLs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::link::Link;

/// Global display settings.
///
/// `default_domain` is used to build short URLs for links without a custom
/// domain. `custom_domains` keeps insertion order and never holds duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_domain: String,
    #[serde(default)]
    pub custom_domains: Vec<String>,
}

impl Settings {
    /// Creates settings with the given default domain and no custom domains.
    pub fn new(default_domain: impl Into<String>) -> Self {
        Self {
            default_domain: default_domain.into(),
            custom_domains: Vec::new(),
        }
    }

    /// Adds a custom domain unless it is already present.
    ///
    /// Returns `true` if the domain was added.
    pub fn add_custom_domain(&mut self, domain: &str) -> bool {
        if self.custom_domains.iter().any(|d| d == domain) {
            return false;
        }
        self.custom_domains.push(domain.to_string());
        true
    }

    /// Drops repeated custom domains, keeping the first occurrence of each.
    pub fn dedup_custom_domains(&mut self) {
        let mut seen = HashSet::new();
        self.custom_domains.retain(|d| seen.insert(d.clone()));
    }

    /// Removes a custom domain. Returns `true` if it was present.
    pub fn remove_custom_domain(&mut self, domain: &str) -> bool {
        let before = self.custom_domains.len();
        self.custom_domains.retain(|d| d != domain);
        self.custom_domains.len() != before
    }
}

/// Full persisted state: every link plus the settings record.
///
/// This is the unit of export and import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub links: Vec<Link>,
    pub settings: Settings,
}

impl Snapshot {
    /// An empty snapshot with the given settings.
    pub fn empty(settings: Settings) -> Self {
        Self {
            links: Vec::new(),
            settings,
        }
    }
}
