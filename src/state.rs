//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{
    BackupService, LinkService, RedirectService, SettingsService, StatsService,
};
use crate::domain::click_event::ClickEvent;
use crate::domain::entities::Settings;
use crate::infrastructure::persistence::JsonStore;

/// Services wired to one [`JsonStore`], plus the click queue sender.
///
/// Cheap to clone; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<JsonStore, JsonStore>>,
    pub redirect_service: Arc<RedirectService<JsonStore>>,
    pub stats_service: Arc<StatsService<JsonStore>>,
    pub settings_service: Arc<SettingsService<JsonStore>>,
    pub backup_service: Arc<BackupService<JsonStore>>,
    pub store: Arc<JsonStore>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    /// Builds every service on top of `store`.
    ///
    /// `default_settings` is what a full reset restores.
    pub fn new(
        store: Arc<JsonStore>,
        click_sender: mpsc::Sender<ClickEvent>,
        public_scheme: &str,
        default_settings: Settings,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(store.clone(), store.clone(), public_scheme)),
            redirect_service: Arc::new(RedirectService::new(store.clone())),
            stats_service: Arc::new(StatsService::new(store.clone())),
            settings_service: Arc::new(SettingsService::new(store.clone())),
            backup_service: Arc::new(BackupService::new(store.clone(), default_settings)),
            store,
            click_sender,
        }
    }
}
