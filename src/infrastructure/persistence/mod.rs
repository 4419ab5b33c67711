//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Listing
//! queries are assembled with [`sqlx::QueryBuilder`] because their `WHERE`
//! clause depends on which filters the caller supplied.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User storage
//! - [`PgCourseRepository`] - Course storage
//! - [`PgEnrollmentRepository`] - Enrollment storage and status counts

pub mod pg_course_repository;
pub mod pg_enrollment_repository;
mod pg_filters;
pub mod pg_user_repository;

pub use pg_course_repository::PgCourseRepository;
pub use pg_enrollment_repository::PgEnrollmentRepository;
pub use pg_user_repository::PgUserRepository;
