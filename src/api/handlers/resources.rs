//! Generic CRUD handlers shared by every resource.
//!
//! Each handler is instantiated per service type in
//! [`crate::api::routes::resource_routes`]; the service is pulled out of
//! [`crate::state::AppState`] through `FromRef`.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::pagination::PaginationParams;
use crate::application::services::ResourceService;
use crate::domain::filter::ToFilterPredicate;
use crate::domain::pagination::{PageRequest, PaginationPolicy};
use crate::error::AppError;

/// `POST /{resource}`
///
/// # Response Codes
///
/// - **200 OK**: created entity in `data`
/// - **400 Bad Request**: malformed JSON, missing field or unknown reference
pub async fn create_handler<S: ResourceService>(
    State(service): State<Arc<S>>,
    payload: Result<Json<S::Create>, JsonRejection>,
) -> Result<Json<ApiResponse<S::Entity>>, AppError> {
    let Json(input) = payload?;

    let created = service.create(input).await?;

    Ok(Json(ApiResponse::ok(created)))
}

/// `GET /{resource}/{id}`
pub async fn get_handler<S: ResourceService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<S::Entity>>, AppError> {
    let entity = service.get(&id).await?;

    Ok(Json(ApiResponse::ok(entity)))
}

/// `GET /{resource}?page=&limit=&<filters>`
///
/// Runs the page query and the count query concurrently with the same
/// filters, then attaches pagination metadata.
///
/// # Response
///
/// ```json
/// {
///   "status": 200,
///   "data": [ ... ],
///   "meta": { "page": 2, "limit": 10, "total": 25, "total_pages": 3 }
/// }
/// ```
pub async fn list_handler<S: ResourceService>(
    State(service): State<Arc<S>>,
    State(policy): State<PaginationPolicy>,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
    filters: Result<Query<S::Filters>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<S::Entity>>>, AppError> {
    let Query(pagination) = pagination?;
    let Query(filters) = filters?;

    let request = PageRequest::resolve(pagination.page, pagination.limit, &policy)?;
    let predicate = filters.to_predicate();

    let (items, total) = tokio::try_join!(
        service.get_all(&predicate, request.offset(), request.limit()),
        service.count(&predicate),
    )?;

    Ok(Json(ApiResponse::with_meta(items, request.meta(total))))
}

/// `PATCH /{resource}/{id}`
///
/// Only the fields present in the body are changed. Returns the updated
/// entity.
pub async fn update_handler<S: ResourceService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
    payload: Result<Json<S::Update>, JsonRejection>,
) -> Result<Json<ApiResponse<S::Entity>>, AppError> {
    let Json(update) = payload?;

    let updated = service.update(&id, update).await?;

    Ok(Json(ApiResponse::ok(updated)))
}

/// `DELETE /{resource}/{id}`
pub async fn delete_handler<S: ResourceService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    service.delete(&id).await?;

    Ok(Json(ApiResponse::ok("success")))
}
