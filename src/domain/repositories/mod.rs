//! Repository trait definitions for the domain layer.
//!
//! These traits form the storage port. Services depend on them only, and
//! `crate::infrastructure::persistence` provides the implementation.
//! Mock implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link lookup and revision-checked saves
//! - [`SettingsRepository`] - Default and custom domains
//! - [`SnapshotRepository`] - Export and import of the whole store

pub mod link_repository;
pub mod settings_repository;
pub mod snapshot_repository;

pub use link_repository::LinkRepository;
pub use settings_repository::SettingsRepository;
pub use snapshot_repository::SnapshotRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
#[cfg(test)]
pub use snapshot_repository::MockSnapshotRepository;
