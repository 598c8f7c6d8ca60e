//! # splitlink
//!
//! A URL shortener with weighted A/B destinations, UTM tagging and click
//! analytics, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits, A/B and analytics rules
//! - **Application Layer** ([`application`]) - Business logic and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON document store
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Custom or generated short codes
//! - Weighted A/B destinations with per-click variant tracking
//! - UTM parameters merged into every redirect
//! - Click analytics: totals, rolling 24h window, daily history, 90-day retention
//! - Asynchronous click tracking with retry on concurrent writes
//! - JSON export/import
//!
//! ## Quick Start
//!
//! ```bash
//! export DATA_FILE="./data/links.json"   # Optional, in-memory otherwise
//! export DEFAULT_DOMAIN="s.example.com"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        BackupService, LinkService, RedirectService, SettingsService, StatsService,
    };
    pub use crate::domain::entities::{
        ClickStats, Link, LinkPatch, NewLink, Settings, Snapshot, UtmParams, Variant,
    };
    pub use crate::domain::repositories::{LinkRepository, SettingsRepository, SnapshotRepository};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::JsonStore;
    pub use crate::state::AppState;
}
