//! Repository trait for link storage.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage port for [`Link`] records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonStore`] - in-memory JSON document, optionally file-backed
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns every link in insertion order.
    async fn get_all(&self) -> Result<Vec<Link>, AppError>;

    /// Finds a link by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError>;

    /// Inserts or replaces a link by id and returns the stored version.
    ///
    /// New links are stored with revision 1. Replacing requires the incoming
    /// `revision` to match the stored one; the stored revision is then
    /// incremented.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on a revision mismatch.
    /// Returns [`AppError::Persistence`] when the document cannot be written.
    async fn save(&self, link: Link) -> Result<Link, AppError>;

    /// Removes a link by id. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
