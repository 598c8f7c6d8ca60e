//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and domain rules, and
//! give HTTP handlers and the admin CLI a single API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, editing and short URLs
//! - [`services::redirect_service::RedirectService`] - Code resolution with A/B and UTM handling
//! - [`services::stats_service::StatsService`] - Click recording and analytics
//! - [`services::settings_service::SettingsService`] - Default and custom domains
//! - [`services::backup_service::BackupService`] - Export, import and reset

pub mod services;
