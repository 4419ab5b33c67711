//! In-memory implementations of the domain repository traits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;

use super::table::InMemoryTable;
use crate::domain::entities::{
    Course, CoursePatch, Enrollment, EnrollmentPatch, EnrollmentStatus, User, UserPatch,
};
use crate::domain::filter::FilterPredicate;
use crate::domain::repositories::{CourseRepository, EnrollmentRepository, UserRepository};
use crate::error::AppError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: InMemoryTable<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AppError> {
        self.table.insert(user).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.table.get(id).await)
    }

    async fn list(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        Ok(self.table.list(filters, offset, limit).await)
    }

    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError> {
        Ok(self.table.count(filters).await)
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>, AppError> {
        if patch.is_empty() {
            return Ok(self.table.get(id).await);
        }

        Ok(self
            .table
            .update(id, |user| {
                patch.apply(user);
                user.updated_at = Utc::now();
            })
            .await)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.table.remove(id).await)
    }
}

#[derive(Default)]
pub struct InMemoryCourseRepository {
    table: InMemoryTable<Course>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, course: Course) -> Result<Course, AppError> {
        self.table.insert(course).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Course>, AppError> {
        Ok(self.table.get(id).await)
    }

    async fn list(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Course>, AppError> {
        Ok(self.table.list(filters, offset, limit).await)
    }

    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError> {
        Ok(self.table.count(filters).await)
    }

    async fn update(&self, id: &str, patch: CoursePatch) -> Result<Option<Course>, AppError> {
        if patch.is_empty() {
            return Ok(self.table.get(id).await);
        }

        Ok(self
            .table
            .update(id, |course| {
                patch.apply(course);
                course.updated_at = Utc::now();
            })
            .await)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.table.remove(id).await)
    }
}

#[derive(Default)]
pub struct InMemoryEnrollmentRepository {
    table: InMemoryTable<Enrollment>,
}

impl InMemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn create(&self, enrollment: Enrollment) -> Result<Enrollment, AppError> {
        self.table.insert(enrollment).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Enrollment>, AppError> {
        Ok(self.table.get(id).await)
    }

    async fn list(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Enrollment>, AppError> {
        Ok(self.table.list(filters, offset, limit).await)
    }

    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError> {
        Ok(self.table.count(filters).await)
    }

    async fn count_by_status(&self) -> Result<Vec<(EnrollmentStatus, i64)>, AppError> {
        let mut counts: BTreeMap<&'static str, (EnrollmentStatus, i64)> = BTreeMap::new();
        for enrollment in self.table.snapshot().await {
            counts
                .entry(enrollment.status.as_str())
                .or_insert((enrollment.status, 0))
                .1 += 1;
        }

        Ok(counts.into_values().collect())
    }

    async fn update(
        &self,
        id: &str,
        patch: EnrollmentPatch,
    ) -> Result<Option<Enrollment>, AppError> {
        if patch.is_empty() {
            return Ok(self.table.get(id).await);
        }

        Ok(self
            .table
            .update(id, |enrollment| {
                patch.apply(enrollment);
                enrollment.updated_at = Utc::now();
            })
            .await)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.table.remove(id).await)
    }
}
