//! PostgreSQL implementation of the course repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use super::pg_filters::{push_filters, push_page};
use crate::domain::entities::{Course, CoursePatch};
use crate::domain::filter::FilterPredicate;
use crate::domain::patch::Patch;
use crate::domain::repositories::CourseRepository;
use crate::error::AppError;

const COLUMNS: &str = "id, name, start_date, end_date, created_at, updated_at";

#[derive(FromRow)]
struct CourseRow {
    id: String,
    name: String,
    start_date: String,
    end_date: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(r: CourseRow) -> Self {
        Course {
            id: r.id,
            name: r.name,
            start_date: r.start_date,
            end_date: r.end_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for courses.
///
/// Dates live in `TEXT` columns so they round-trip exactly as validated.
pub struct PgCourseRepository {
    pool: Arc<PgPool>,
}

impl PgCourseRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn create(&self, course: Course) -> Result<Course, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            INSERT INTO courses (id, name, start_date, end_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&course.id)
        .bind(&course.name)
        .bind(&course.start_date)
        .bind(&course.end_date)
        .bind(course.created_at)
        .bind(course.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Course>, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Course::from))
    }

    async fn list(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Course>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM courses"));
        push_filters(&mut qb, filters);
        push_page(&mut qb, offset, limit);

        let rows = qb
            .build_query_as::<CourseRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM courses");
        push_filters(&mut qb, filters);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: &str, patch: CoursePatch) -> Result<Option<Course>, AppError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE courses SET ");
        {
            let mut set = qb.separated(", ");
            if let Patch::Present(name) = patch.name {
                set.push("name = ").push_bind_unseparated(name);
            }
            if let Patch::Present(start_date) = patch.start_date {
                set.push("start_date = ").push_bind_unseparated(start_date);
            }
            if let Patch::Present(end_date) = patch.end_date {
                set.push("end_date = ").push_bind_unseparated(end_date);
            }
            set.push("updated_at = ").push_bind_unseparated(Utc::now());
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(COLUMNS);

        let row = qb
            .build_query_as::<CourseRow>()
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Course::from))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
