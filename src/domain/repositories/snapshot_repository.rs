//! Repository trait for whole-store export and import.

use crate::domain::entities::Snapshot;
use crate::error::AppError;
use async_trait::async_trait;

/// Bulk access to every link and the settings at once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Returns a consistent copy of links and settings.
    async fn export_all(&self) -> Result<Snapshot, AppError>;

    /// Replaces links and settings wholesale.
    ///
    /// Revisions in `snapshot` are kept as given.
    async fn import_all(&self, snapshot: Snapshot) -> Result<(), AppError>;
}
