//! Repository trait for enrollment data access.

use crate::domain::entities::{Enrollment, EnrollmentPatch, EnrollmentStatus};
use crate::domain::filter::FilterPredicate;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing enrollments.
///
/// Stores `user_id` / `course_id` as given. Existence of the referenced
/// rows is checked by [`crate::application::services::EnrollmentService`]
/// before [`EnrollmentRepository::create`] is called, never by storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn create(&self, enrollment: Enrollment) -> Result<Enrollment, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Enrollment>, AppError>;

    /// Lists enrollments matching `filters`, newest first.
    async fn list(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Enrollment>, AppError>;

    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError>;

    /// Counts enrollments per status. Statuses without rows are omitted.
    async fn count_by_status(&self) -> Result<Vec<(EnrollmentStatus, i64)>, AppError>;

    async fn update(
        &self,
        id: &str,
        patch: EnrollmentPatch,
    ) -> Result<Option<Enrollment>, AppError>;

    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
