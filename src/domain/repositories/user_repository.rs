//! Repository trait for user data access.

use crate::domain::entities::{User, UserPatch};
use crate::domain::filter::FilterPredicate;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing users.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryUserRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a fully built user and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn create(&self, user: User) -> Result<User, AppError>;

    /// Finds a user by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Lists users matching `filters`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn list(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError>;

    /// Counts users matching `filters`, ignoring paging.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError>;

    /// Writes the supplied fields and returns the updated user.
    ///
    /// Returns `Ok(None)` if no user has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>, AppError>;

    /// Deletes a user.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
