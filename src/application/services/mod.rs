//! Business logic services for the application layer.

pub mod backup_service;
pub mod link_service;
pub mod redirect_service;
pub mod settings_service;
pub mod stats_service;

pub use backup_service::{BackupService, ImportSummary};
pub use link_service::LinkService;
pub use redirect_service::{RedirectService, Resolution};
pub use settings_service::SettingsService;
pub use stats_service::{LinkStatsView, StatsService};
