//! Contract shared by the user, course and enrollment services.
//!
//! The HTTP layer is written once against [`ResourceService`]; any service
//! implementing it gets the five CRUD endpoints plus paginated listing.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::filter::{FilterPredicate, ToFilterPredicate};
use crate::error::AppError;

/// CRUD capability set of a resource.
#[async_trait]
pub trait ResourceService: Send + Sync + 'static {
    /// Stored representation returned to callers.
    type Entity: Serialize + Send + 'static;
    /// Creation command decoded from a request body.
    type Create: DeserializeOwned + Send + 'static;
    /// Partial update command decoded from a request body.
    type Update: DeserializeOwned + Send + 'static;
    /// Raw listing filters decoded from a query string.
    type Filters: DeserializeOwned + ToFilterPredicate + Send + 'static;

    /// Validates the command, assigns an id and persists the new entity.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if a required field is missing or malformed
    /// - [`AppError::Persistence`] if storage fails
    async fn create(&self, input: Self::Create) -> Result<Self::Entity, AppError>;

    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no entity has this id
    /// - [`AppError::Persistence`] if storage fails
    async fn get(&self, id: &str) -> Result<Self::Entity, AppError>;

    /// Lists matching entities, newest first. An empty page is not an error.
    async fn get_all(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Self::Entity>, AppError>;

    /// Counts every entity matching `filters`, regardless of paging.
    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError>;

    /// Applies a partial update and returns the updated entity.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if a supplied field is invalid; storage is not touched
    /// - [`AppError::NotFound`] if no entity has this id
    /// - [`AppError::Persistence`] if storage fails
    async fn update(&self, id: &str, update: Self::Update) -> Result<Self::Entity, AppError>;

    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no entity has this id
    /// - [`AppError::Persistence`] if storage fails
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Rejects empty and whitespace-only values of a required field.
pub(crate) fn require(label: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{label} is required")));
    }
    Ok(())
}

/// Maps a blank optional value to `None`.
pub(crate) fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("name", "Rust").is_ok());

        let err = require("name", "  ").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(" ".to_string()), None);
        assert_eq!(non_blank("x".to_string()), Some("x".to_string()));
    }
}
