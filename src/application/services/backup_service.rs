//! Export, import and reset of the whole store.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::{Link, Settings, Snapshot};
use crate::domain::repositories::SnapshotRepository;
use crate::error::AppError;

/// Import document. Either section may be omitted.
#[derive(Debug, Deserialize)]
struct ImportDocument {
    #[serde(default)]
    links: Option<Vec<Link>>,
    #[serde(default)]
    settings: Option<Settings>,
}

/// Counts reported after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub links: usize,
    pub links_replaced: bool,
    pub settings_replaced: bool,
}

pub struct BackupService<R: SnapshotRepository> {
    repository: Arc<R>,
    default_settings: Settings,
}

impl<R: SnapshotRepository> BackupService<R> {
    /// `default_settings` is what [`Self::clear_all`] resets to.
    pub fn new(repository: Arc<R>, default_settings: Settings) -> Self {
        Self {
            repository,
            default_settings,
        }
    }

    /// Serializes every link and the settings as pretty-printed JSON.
    pub async fn export_json(&self) -> Result<String, AppError> {
        let snapshot = self.repository.export_all().await?;
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Replaces stored data with the contents of an export document.
    ///
    /// Sections missing from the document keep their current values. Repeated
    /// custom domains in imported settings are collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the document is not valid JSON of
    /// the export shape or contains the same short code twice.
    pub async fn import_json(&self, text: &str) -> Result<ImportSummary, AppError> {
        let document: ImportDocument = serde_json::from_str(text).map_err(|e| {
            AppError::invalid_input("Invalid import document", json!({ "reason": e.to_string() }))
        })?;

        if let Some(links) = &document.links {
            let mut seen = HashSet::new();
            if let Some(dup) = links.iter().find(|l| !seen.insert(l.short_code.as_str())) {
                return Err(AppError::invalid_input(
                    "Import contains duplicate short codes",
                    json!({ "code": dup.short_code }),
                ));
            }
        }

        let current = self.repository.export_all().await?;

        let summary = ImportSummary {
            links: document.links.as_ref().map_or(current.links.len(), Vec::len),
            links_replaced: document.links.is_some(),
            settings_replaced: document.settings.is_some(),
        };

        let settings = match document.settings {
            Some(mut settings) => {
                settings.dedup_custom_domains();
                settings
            }
            None => current.settings,
        };

        let snapshot = Snapshot {
            links: document.links.unwrap_or(current.links),
            settings,
        };

        self.repository.import_all(snapshot).await?;

        tracing::info!(
            links = summary.links,
            links_replaced = summary.links_replaced,
            settings_replaced = summary.settings_replaced,
            "Import completed"
        );

        Ok(summary)
    }

    /// Deletes every link and restores default settings.
    pub async fn clear_all(&self) -> Result<(), AppError> {
        self.repository
            .import_all(Snapshot::empty(self.default_settings.clone()))
            .await?;

        tracing::warn!("All data cleared");
        Ok(())
    }
}
