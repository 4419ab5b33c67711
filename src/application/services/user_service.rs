//! User management service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use validator::ValidateEmail;

use super::resource::{ResourceService, non_blank, require};
use crate::domain::entities::{NewUser, User, UserFilters, UserPatch, UserUpdate};
use crate::domain::filter::FilterPredicate;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Service for managing users.
///
/// Enforces that first and last name are never blank and that a supplied
/// email is well formed. Phone numbers are stored as given.
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    fn not_found(id: &str) -> AppError {
        AppError::not_found(format!("user '{id}' does not exist"))
    }
}

/// Blank is allowed (it means "no email"); anything else must parse.
fn validate_email(email: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(AppError::validation(format!("'{email}' is not a valid email")))
    }
}

#[async_trait]
impl<R: UserRepository + ?Sized + 'static> ResourceService for UserService<R> {
    type Entity = User;
    type Create = NewUser;
    type Update = UserUpdate;
    type Filters = UserFilters;

    async fn create(&self, input: NewUser) -> Result<User, AppError> {
        require("first name", &input.first_name)?;
        require("last name", &input.last_name)?;

        let email = input.email.and_then(non_blank);
        if let Some(email) = &email {
            validate_email(email)?;
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            first_name: input.first_name,
            last_name: input.last_name,
            email,
            phone: input.phone.and_then(non_blank),
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, "User created");

        Ok(created)
    }

    async fn get(&self, id: &str) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn get_all(
        &self,
        filters: &FilterPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        self.repository.list(filters, offset, limit).await
    }

    async fn count(&self, filters: &FilterPredicate) -> Result<i64, AppError> {
        self.repository.count(filters).await
    }

    async fn update(&self, id: &str, update: UserUpdate) -> Result<User, AppError> {
        if let Some(first_name) = update.first_name.as_ref().present() {
            require("first name", first_name)?;
        }
        if let Some(last_name) = update.last_name.as_ref().present() {
            require("last name", last_name)?;
        }
        if let Some(email) = update.email.as_ref().present() {
            validate_email(email)?;
        }

        let patch = UserPatch {
            first_name: update.first_name,
            last_name: update.last_name,
            email: update.email.map(non_blank),
            phone: update.phone.map(non_blank),
        };

        let updated = self
            .repository
            .update(id, patch)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        tracing::info!(user_id = %id, "User updated");

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(Self::not_found(id));
        }
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patch::Patch;
    use crate::domain::repositories::MockUserRepository;

    fn create_test_user(id: &str, first_name: &str, last_name: &str) -> User {
        let now = Utc::now();
        User {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn new_user(first_name: &str, last_name: &str) -> NewUser {
        NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create()
            .withf(|user| {
                user.first_name == "Ada" && !user.id.is_empty() && user.created_at == user.updated_at
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(mock_repo));

        let user = service.create(new_user("Ada", "Lovelace")).await.unwrap();

        assert_eq!(user.last_name, "Lovelace");
        assert!(Uuid::parse_str(&user.id).is_ok());
    }

    #[tokio::test]
    async fn test_create_user_missing_first_name() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_create().never();

        let service = UserService::new(Arc::new(mock_repo));

        let err = service.create(new_user("", "Lovelace")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "first name is required");
    }

    #[tokio::test]
    async fn test_create_user_reports_first_missing_field() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));

        let err = service.create(new_user(" ", " ")).await.unwrap_err();

        assert_eq!(err.to_string(), "first name is required");
    }

    #[tokio::test]
    async fn test_create_user_missing_last_name() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));

        let err = service.create(new_user("Ada", "")).await.unwrap_err();

        assert_eq!(err.to_string(), "last name is required");
    }

    #[tokio::test]
    async fn test_create_user_invalid_email() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));

        let input = NewUser {
            email: Some("not-an-email".to_string()),
            ..new_user("Ada", "Lovelace")
        };
        let err = service.create(input).await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_user_blank_optionals_stored_as_none() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .withf(|user| user.email.is_none() && user.phone.is_none())
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(mock_repo));

        let input = NewUser {
            email: Some(String::new()),
            phone: Some("  ".to_string()),
            ..new_user("Ada", "Lovelace")
        };

        assert!(service.create(input).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_user_twice_returns_same_user() {
        let stored = create_test_user("u1", "Jane", "Roe");

        let mut mock_repo = MockUserRepository::new();
        let row = stored.clone();
        mock_repo
            .expect_find_by_id()
            .withf(|id| id == "u1")
            .times(2)
            .returning(move |_| Ok(Some(row.clone())));

        let service = UserService::new(Arc::new(mock_repo));

        let first = service.get("u1").await.unwrap();
        let second = service.get("u1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, stored);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .withf(|id| id == "missing")
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(mock_repo));

        let err = service.get("missing").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_user_persistence_error_passes_through() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(AppError::persistence("Database error", "connection reset")));

        let service = UserService::new(Arc::new(mock_repo));

        let err = service.get("u1").await.unwrap_err();

        assert!(matches!(err, AppError::Persistence { .. }));
    }

    #[tokio::test]
    async fn test_update_user_rejects_blank_name_before_storage() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update().never();

        let service = UserService::new(Arc::new(mock_repo));

        let update = UserUpdate {
            last_name: Patch::Present(String::new()),
            ..Default::default()
        };
        let err = service.update("u1", update).await.unwrap_err();

        assert_eq!(err.to_string(), "last name is required");
    }

    #[tokio::test]
    async fn test_update_user_empty_email_clears_it() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update()
            .withf(|id, patch| {
                id == "u1"
                    && patch.email == Patch::Present(None)
                    && patch.first_name == Patch::Absent
            })
            .times(1)
            .returning(|_, _| Ok(Some(create_test_user("u1", "Ada", "Lovelace"))));

        let service = UserService::new(Arc::new(mock_repo));

        let update = UserUpdate {
            email: Patch::Present(String::new()),
            ..Default::default()
        };

        assert!(service.update("u1", update).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = UserService::new(Arc::new(mock_repo));

        let update = UserUpdate {
            first_name: Patch::Present("Grace".to_string()),
            ..Default::default()
        };
        let err = service.update("missing", update).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = UserService::new(Arc::new(mock_repo));

        let err = service.delete("missing").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_users_forwards_window() {
        let mut mock_repo = MockUserRepository::new();
        let users = vec![
            create_test_user("u2", "Grace", "Hopper"),
            create_test_user("u1", "Ada", "Lovelace"),
        ];

        mock_repo
            .expect_list()
            .withf(|filters, offset, limit| filters.is_empty() && *offset == 20 && *limit == 10)
            .times(1)
            .returning(move |_, _, _| Ok(users.clone()));

        let service = UserService::new(Arc::new(mock_repo));

        let list = service
            .get_all(&FilterPredicate::default(), 20, 10)
            .await
            .unwrap();

        assert_eq!(list.len(), 2);
    }
}
