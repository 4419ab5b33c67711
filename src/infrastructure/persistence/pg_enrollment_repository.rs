//! PostgreSQL implementation of the enrollment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use super::pg_filters::{push_filters, push_page};
use crate::domain::entities::{Enrollment, EnrollmentPatch, EnrollmentStatus};
use crate::domain::filter::FilterPredicate;
use crate::domain::patch::Patch;
use crate::domain::repositories::EnrollmentRepository;
use crate::error::AppError;

const COLUMNS: &str = "id, user_id, course_id, status, created_at, updated_at";

#[derive(FromRow)]
struct EnrollmentRow {
    id: String,
    user_id: String,
    course_id: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = AppError;

    fn try_from(r: EnrollmentRow) -> Result<Self, Self::Error> {
        Ok(Enrollment {
            status: parse_status(&r.status)?,
            id: r.id,
            user_id: r.user_id,
            course_id: r.course_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// The column is constrained to known codes; anything else is corruption.
fn parse_status(code: &str) -> Result<EnrollmentStatus, AppError> {
    code.parse()
        .map_err(|e| AppError::persistence("Corrupt enrollment row", e))
}

/// PostgreSQL repository for enrollments.
pub struct PgEnrollmentRepository {
    pool: Arc<PgPool>,
}

impl PgEnrollmentRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    async fn create(&self, enrollment: Enrollment) -> Result<Enrollment, AppError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(&format!(
            r#"
            INSERT INTO enrollments (id, user_id, course_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&enrollment.id)
        .bind(&enrollment.user_id)
        .bind(&enrollment.course_id)
        .bind(enrollment.status.as_str())
        .bind(enrollment.created_at)
        .bind(enrollment.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Enrollment>, AppError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(&format!(
            "SELECT {COLUMNS} FROM enrollments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Enrollment::try_from).transpose()
    }

    async fn list(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Enrollment>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM enrollments"));
        push_filters(&mut qb, filters);
        push_page(&mut qb, offset, limit);

        let rows = qb
            .build_query_as::<EnrollmentRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Enrollment::try_from).collect()
    }

    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM enrollments");
        push_filters(&mut qb, filters);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_by_status(&self) -> Result<Vec<(EnrollmentStatus, i64)>, AppError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT status, COUNT(*)
            FROM enrollments
            GROUP BY status
            ORDER BY status
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|(code, count)| Ok((parse_status(&code)?, count)))
            .collect()
    }

    async fn update(
        &self,
        id: &str,
        patch: EnrollmentPatch,
    ) -> Result<Option<Enrollment>, AppError> {
        let Patch::Present(status) = patch.status else {
            return self.find_by_id(id).await;
        };

        let row = sqlx::query_as::<_, EnrollmentRow>(&format!(
            r#"
            UPDATE enrollments SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Enrollment::try_from).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
