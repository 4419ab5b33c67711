//! Course management service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::resource::{ResourceService, require};
use crate::domain::entities::{Course, CourseFilters, CoursePatch, NewCourse};
use crate::domain::filter::FilterPredicate;
use crate::domain::repositories::CourseRepository;
use crate::error::AppError;

/// Format every stored course date must follow.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Service for managing courses.
///
/// A course always has a name and both dates. Dates are validated as
/// calendar dates but stored as the caller wrote them.
pub struct CourseService<R: CourseRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CourseRepository + ?Sized> CourseService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    fn not_found(id: &str) -> AppError {
        AppError::not_found(format!("course '{id}' does not exist"))
    }
}

fn validate_date(label: &str, value: &str) -> Result<(), AppError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| AppError::validation(format!("{label} must be a date in YYYY-MM-DD format")))
}

#[async_trait]
impl<R: CourseRepository + ?Sized + 'static> ResourceService for CourseService<R> {
    type Entity = Course;
    type Create = NewCourse;
    type Update = CoursePatch;
    type Filters = CourseFilters;

    async fn create(&self, input: NewCourse) -> Result<Course, AppError> {
        require("name", &input.name)?;
        require("start date", &input.start_date)?;
        require("end date", &input.end_date)?;
        validate_date("start date", &input.start_date)?;
        validate_date("end date", &input.end_date)?;

        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(course).await?;
        tracing::info!(course_id = %created.id, name = %created.name, "Course created");

        Ok(created)
    }

    async fn get(&self, id: &str) -> Result<Course, AppError> {
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
    ) -> Result<Vec<Course>, AppError> {
        self.repository.list(filters, offset, limit).await
    }

    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError> {
        self.repository.count(filters).await
    }

    async fn update(&self, id: &str, patch: CoursePatch) -> Result<Course, AppError> {
        let fields = [
            ("name", patch.name.as_ref().present()),
            ("start date", patch.start_date.as_ref().present()),
            ("end date", patch.end_date.as_ref().present()),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                require(label, value)?;
            }
        }
        if let Some(start_date) = patch.start_date.as_ref().present() {
            validate_date("start date", start_date)?;
        }
        if let Some(end_date) = patch.end_date.as_ref().present() {
            validate_date("end date", end_date)?;
        }

        let updated = self
            .repository
            .update(id, patch)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        tracing::info!(course_id = %id, "Course updated");

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(Self::not_found(id));
        }
        tracing::info!(course_id = %id, "Course deleted");

        Ok(())
    }
}
