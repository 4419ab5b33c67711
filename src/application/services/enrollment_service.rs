//! Enrollment service.
//!
//! Enrollments reference a user and a course by id. Creation looks both up
//! through their services first and refuses ids that do not resolve.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::course_service::CourseService;
use super::resource::{ResourceService, require};
use super::user_service::UserService;
use crate::domain::entities::{
    Enrollment, EnrollmentFilters, EnrollmentPatch, EnrollmentStatus, NewEnrollment,
};
use crate::domain::filter::FilterPredicate;
use crate::domain::repositories::{CourseRepository, EnrollmentRepository, UserRepository};
use crate::error::AppError;

/// Service for managing enrollments.
///
/// The existence checks and the insert are separate storage calls. A user
/// or course deleted between the check and the insert leaves an enrollment
/// pointing at nothing; storage has no foreign keys to catch it.
pub struct EnrollmentService<E, U, C>
where
    E: EnrollmentRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: CourseRepository + ?Sized,
{
    repository: Arc<E>,
    users: Arc<UserService<U>>,
    courses: Arc<CourseService<C>>,
}

impl<E, U, C> EnrollmentService<E, U, C>
where
    E: EnrollmentRepository + ?Sized,
    U: UserRepository + ?Sized + 'static,
    C: CourseRepository + ?Sized + 'static,
{
    pub fn new(
        repository: Arc<E>,
        users: Arc<UserService<U>>,
        courses: Arc<CourseService<C>>,
    ) -> Self {
        Self {
            repository,
            users,
            courses,
        }
    }

    /// Number of enrollments in each status, in [`EnrollmentStatus::ALL`]
    /// order. Statuses nobody is in are reported as zero.
    pub async fn status_summary(&self) -> Result<Vec<(EnrollmentStatus, i64)>, AppError> {
        let counts = self.repository.count_by_status().await?;

        Ok(EnrollmentStatus::ALL
            .into_iter()
            .map(|status| {
                let count = counts
                    .iter()
                    .find(|(s, _)| *s == status)
                    .map_or(0, |(_, count)| *count);
                (status, count)
            })
            .collect())
    }

    fn not_found(id: &str) -> AppError {
        AppError::not_found(format!("enrollment '{id}' does not exist"))
    }
}

/// Turns "lookup said not found" into a reference error. Other failures,
/// storage errors included, keep their kind.
fn ensure_exists<T>(lookup: Result<T, AppError>, resource: &str, id: &str) -> Result<(), AppError> {
    match lookup {
        Ok(_) => Ok(()),
        Err(AppError::NotFound { .. }) => {
            tracing::warn!(resource, id, "Enrollment references a missing {resource}");
            Err(AppError::reference(format!("{resource} '{id}' does not exist")))
        }
        Err(e) => Err(e),
    }
}

#[async_trait]
impl<E, U, C> ResourceService for EnrollmentService<E, U, C>
where
    E: EnrollmentRepository + ?Sized + 'static,
    U: UserRepository + ?Sized + 'static,
    C: CourseRepository + ?Sized + 'static,
{
    type Entity = Enrollment;
    type Create = NewEnrollment;
    type Update = EnrollmentPatch;
    type Filters = EnrollmentFilters;

    /// Creates a pending enrollment.
    ///
    /// The user is checked before the course; a missing user is reported
    /// without the course being looked up.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `user_id` or `course_id` is blank
    /// - [`AppError::Reference`] if the user or the course does not exist
    /// - [`AppError::Persistence`] if storage fails, during the checks or the insert
    async fn create(&self, input: NewEnrollment) -> Result<Enrollment, AppError> {
        require("user id", &input.user_id)?;
        require("course id", &input.course_id)?;

        ensure_exists(self.users.get(&input.user_id).await, "user", &input.user_id)?;
        ensure_exists(
            self.courses.get(&input.course_id).await,
            "course",
            &input.course_id,
        )?;

        let now = Utc::now();
        let enrollment = Enrollment {
            id: Uuid::new_v4().to_string(),
            user_id: input.user_id,
            course_id: input.course_id,
            status: EnrollmentStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(enrollment).await?;
        tracing::info!(
            enrollment_id = %created.id,
            user_id = %created.user_id,
            course_id = %created.course_id,
            "Enrollment created"
        );

        Ok(created)
    }

    async fn get(&self, id: &str) -> Result<Enrollment, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn get_all(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Enrollment>, AppError> {
        self.repository.list(filters, offset, limit).await
    }

    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError> {
        self.repository.count(filters).await
    }

    /// Changes the status. The user and course of an enrollment are fixed.
    async fn update(&self, id: &str, patch: EnrollmentPatch) -> Result<Enrollment, AppError> {
        let status = patch.status.as_ref().present().copied();

        let updated = self
            .repository
            .update(id, patch)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        if let Some(status) = status {
            tracing::info!(enrollment_id = %id, %status, "Enrollment status changed");
        }

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(Self::not_found(id));
        }
        tracing::info!(enrollment_id = %id, "Enrollment deleted");

        Ok(())
    }
}
