//! Core domain entities and the commands that act on them.
//!
//! Entities are plain data. Each entity module also defines:
//! - `New*` - creation request
//! - `*Patch` / `*Update` - partial update built from [`crate::domain::patch::Patch`] fields
//! - `*Filters` - raw listing filters convertible into a
//!   [`crate::domain::filter::FilterPredicate`]

pub mod course;
pub mod enrollment;
pub mod user;

pub use course::{Course, CourseFilters, CoursePatch, NewCourse};
pub use enrollment::{
    Enrollment, EnrollmentFilters, EnrollmentPatch, EnrollmentStatus, NewEnrollment,
};
pub use user::{NewUser, User, UserFilters, UserPatch, UserUpdate};
