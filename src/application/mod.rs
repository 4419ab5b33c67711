//! Application layer services implementing business logic.
//!
//! This layer validates commands, assigns identities and timestamps, and
//! coordinates repository calls. Services consume repository traits and expose
//! the uniform [`services::ResourceService`] API to HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - User CRUD with name and email validation
//! - [`services::course_service::CourseService`] - Course CRUD with date validation
//! - [`services::enrollment_service::EnrollmentService`] - Enrollments with reference checks

pub mod services;
