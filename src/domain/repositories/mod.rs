//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence` and `crate::infrastructure::memory`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Contract
//!
//! Every repository follows the same shape:
//!
//! - `find_by_id` returns `Ok(None)` when the row does not exist
//! - `update` returns `Ok(None)`, `delete` returns `Ok(false)` for an unknown id
//! - any storage failure is [`crate::error::AppError::Persistence`]
//!
//! so services can tell "not found" (404) from "storage broke" (500).
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User CRUD operations
//! - [`CourseRepository`] - Course CRUD operations
//! - [`EnrollmentRepository`] - Enrollment CRUD operations and status counts

pub mod course_repository;
pub mod enrollment_repository;
pub mod user_repository;

pub use course_repository::CourseRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
