//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Record store for short links.
///
/// The store is the only shared mutable resource in the service. It owns two
/// guarantees the application relies on: a uniqueness constraint on the short
/// code, and an atomic counter increment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Returns true if a link with this code is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Inserts a new link with a zero counter and both timestamps set to now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Replaces the destination and refreshes `updated_at`.
    ///
    /// Returns `Ok(None)` when no link has this code.
    async fn update_url(&self, code: &str, url: &str) -> Result<Option<ShortLink>, AppError>;

    /// Deletes a link. Returns `Ok(false)` if no link had this code.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Adds one to the access counter in a single store operation and returns
    /// the destination URL.
    ///
    /// Concurrent calls for the same code must all be reflected in the counter.
    /// Returns `Ok(None)` when no link has this code.
    async fn increment_access_count(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Lists links ordered by access count (most visited first).
    async fn list_most_accessed(&self, limit: i64) -> Result<Vec<ShortLink>, AppError>;

    /// Counts stored links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums `access_count` over all links.
    async fn total_access_count(&self) -> Result<i64, AppError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
