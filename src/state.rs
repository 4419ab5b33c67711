//! Shared application state injected into handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::application::services::{CourseService, EnrollmentService, UserService};
use crate::domain::pagination::PaginationPolicy;
use crate::domain::repositories::{CourseRepository, EnrollmentRepository, UserRepository};
use crate::infrastructure::memory::{
    InMemoryCourseRepository, InMemoryEnrollmentRepository, InMemoryUserRepository,
};

pub type UserSvc = UserService<dyn UserRepository>;
pub type CourseSvc = CourseService<dyn CourseRepository>;
pub type EnrollmentSvc =
    EnrollmentService<dyn EnrollmentRepository, dyn UserRepository, dyn CourseRepository>;

/// Services built once at startup and shared by every request.
///
/// Handlers extract the piece they need (`State<Arc<UserSvc>>`,
/// `State<PaginationPolicy>`, ...) through the [`FromRef`] impls below.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserSvc>,
    pub courses: Arc<CourseSvc>,
    pub enrollments: Arc<EnrollmentSvc>,
    pub pagination: PaginationPolicy,
}

impl AppState {
    /// Wires the services over the given repositories. The enrollment
    /// service shares the user and course service instances.
    pub fn new(
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        pagination: PaginationPolicy,
    ) -> Self {
        let users = Arc::new(UserService::new(users));
        let courses = Arc::new(CourseService::new(courses));
        let enrollments = Arc::new(EnrollmentService::new(
            enrollments,
            users.clone(),
            courses.clone(),
        ));

        Self {
            users,
            courses,
            enrollments,
            pagination,
        }
    }

    /// State backed by fresh in-memory repositories.
    pub fn in_memory(pagination: PaginationPolicy) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryCourseRepository::new()),
            Arc::new(InMemoryEnrollmentRepository::new()),
            pagination,
        )
    }
}

impl FromRef<AppState> for Arc<UserSvc> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for Arc<CourseSvc> {
    fn from_ref(state: &AppState) -> Self {
        state.courses.clone()
    }
}

impl FromRef<AppState> for Arc<EnrollmentSvc> {
    fn from_ref(state: &AppState) -> Self {
        state.enrollments.clone()
    }
}

impl FromRef<AppState> for PaginationPolicy {
    fn from_ref(state: &AppState) -> Self {
        state.pagination
    }
}
