//! Application error type shared by every layer.
//!
//! Services return [`AppError`] unchanged up to the HTTP boundary, where
//! [`IntoResponse`] turns it into the uniform response envelope.
//!
//! | Variant | HTTP status |
//! |---|---|
//! | [`AppError::Validation`] | 400 |
//! | [`AppError::Reference`] | 400 |
//! | [`AppError::InvalidPagination`] | 400 |
//! | [`AppError::NotFound`] | 404 |
//! | [`AppError::Persistence`] | 500 |

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::envelope::ApiResponse;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required field is missing, empty or malformed.
    #[error("{message}")]
    Validation { message: String },

    /// The addressed resource does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// An id supplied in the request body points at a resource that does not exist.
    #[error("{message}")]
    Reference { message: String },

    /// Storage failure not attributable to the caller.
    #[error("{message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Page or limit explicitly supplied with a value below 1.
    #[error("{message}")]
    InvalidPagination { message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn reference(message: impl Into<String>) -> Self {
        Self::Reference {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Persistence {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn invalid_pagination(message: impl Into<String>) -> Self {
        Self::InvalidPagination {
            message: message.into(),
        }
    }

    /// HTTP status the adapter answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::Reference { .. }
            | AppError::InvalidPagination { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Persistence { message, source } = &self {
            match source {
                Some(source) => tracing::error!(error = %source, "{message}"),
                None => tracing::error!("{message}"),
            }
        }

        let body: ApiResponse<()> = ApiResponse::error(status, self.to_string());

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::persistence("Database error", e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        AppError::validation("invalid request format")
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation(format!("invalid query parameters: {}", rejection.body_text()))
    }
}
