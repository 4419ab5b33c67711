//! Uniform response envelope.

use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::pagination::PageMeta;

/// Body of every API response.
///
/// ```json
/// {"status": 200, "data": [...], "meta": {"page": 1, "limit": 10, "total": 3, "total_pages": 1}}
/// {"status": 404, "error": "user 'x' does not exist"}
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data: Some(data),
            error: None,
            meta: None,
        }
    }

    /// Successful listing with pagination metadata.
    pub fn with_meta(data: T, meta: PageMeta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::ok(data)
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            data: None,
            error: Some(message.into()),
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::{PageRequest, PaginationPolicy};
    use serde_json::json;

    #[test]
    fn test_ok_omits_error_and_meta() {
        let body = serde_json::to_value(ApiResponse::ok("success")).unwrap();

        assert_eq!(body, json!({"status": 200, "data": "success"}));
    }

    #[test]
    fn test_error_omits_data() {
        let body: ApiResponse<()> = ApiResponse::error(StatusCode::NOT_FOUND, "missing");

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"status": 404, "error": "missing"})
        );
    }

    #[test]
    fn test_meta_hides_offset() {
        let meta = PageRequest::resolve(Some(2), Some(10), &PaginationPolicy::default())
            .unwrap()
            .meta(25);
        let body = serde_json::to_value(ApiResponse::with_meta(vec![1, 2], meta)).unwrap();

        assert_eq!(
            body["meta"],
            json!({"page": 2, "limit": 10, "total": 25, "total_pages": 3})
        );
    }
}
