//! DTOs for export and import.

use serde::Serialize;

use crate::application::services::ImportSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub links: usize,
    pub links_replaced: bool,
    pub settings_replaced: bool,
}

impl From<ImportSummary> for ImportResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            links: summary.links,
            links_replaced: summary.links_replaced,
            settings_replaced: summary.settings_replaced,
        }
    }
}
