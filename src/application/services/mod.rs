//! Business logic services for the application layer.

pub mod course_service;
pub mod enrollment_service;
pub mod resource;
pub mod user_service;

pub use course_service::CourseService;
pub use enrollment_service::EnrollmentService;
pub use resource::ResourceService;
pub use user_service::UserService;
