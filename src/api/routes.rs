//! API route configuration.

use std::sync::Arc;

use axum::{Router, extract::FromRef, routing::get};

use crate::api::handlers::{
    create_handler, delete_handler, get_handler, list_handler, update_handler,
};
use crate::application::services::ResourceService;
use crate::state::{AppState, CourseSvc, EnrollmentSvc, UserSvc};

/// CRUD routes for one resource, relative to its mount point.
///
/// - `GET    /`     - Paginated, filtered listing
/// - `POST   /`     - Create
/// - `GET    /{id}` - Fetch one
/// - `PATCH  /{id}` - Partial update
/// - `DELETE /{id}` - Delete
pub fn resource_routes<S>() -> Router<AppState>
where
    S: ResourceService,
    Arc<S>: FromRef<AppState>,
{
    Router::new()
        .route("/", get(list_handler::<S>).post(create_handler::<S>))
        .route(
            "/{id}",
            get(get_handler::<S>)
                .patch(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
}

/// All resource routes.
///
/// # Endpoints
///
/// - `/users`       - filters: `first_name`, `last_name`
/// - `/courses`     - filters: `name`, `start_date`, `end_date`
/// - `/enrollments` - filters: `user_id`, `course_id` (exact match)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", resource_routes::<UserSvc>())
        .nest("/courses", resource_routes::<CourseSvc>())
        .nest("/enrollments", resource_routes::<EnrollmentSvc>())
}
