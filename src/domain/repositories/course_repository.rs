//! Repository trait for course data access.

use crate::domain::entities::{Course, CoursePatch};
use crate::domain::filter::FilterPredicate;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing courses.
///
/// Same contract as [`super::UserRepository`]: lookups return `Option`,
/// update and delete report whether the id matched, everything else is
/// [`AppError::Persistence`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: Course) -> Result<Course, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Course>, AppError>;

    /// Lists courses matching `filters`, newest first.
    async fn list(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Course>, AppError>;

    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError>;

    async fn update(&self, id: &str, patch: CoursePatch) -> Result<Option<Course>, AppError>;

    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
