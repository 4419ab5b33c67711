//! User entity and the commands that create, change and filter users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::filter::{FilterBuilder, FilterPredicate, Filterable, ToFilterPredicate};
use crate::domain::patch::Patch;

/// A registered user.
///
/// `email` and `phone` are optional; every other field is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Filterable for User {
    fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "id" => Some(&self.id),
            "first_name" => Some(&self.first_name),
            "last_name" => Some(&self.last_name),
            "email" => self.email.as_deref(),
            "phone" => self.phone.as_deref(),
            _ => None,
        }
    }
}

/// Request to create a user.
///
/// Missing JSON keys decode as empty strings so the service, not the
/// decoder, reports which required field is missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Request to change a user, as sent by the caller.
///
/// An empty `email` or `phone` clears the stored value; an empty name is
/// rejected by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserUpdate {
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
}

/// Validated change set handed to the repository.
///
/// `Present(None)` on an optional column clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
    pub email: Patch<Option<String>>,
    pub phone: Patch<Option<String>>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        !(self.first_name.is_present()
            || self.last_name.is_present()
            || self.email.is_present()
            || self.phone.is_present())
    }

    /// Writes the supplied fields into `user`.
    pub fn apply(self, user: &mut User) {
        self.first_name.apply_to(&mut user.first_name);
        self.last_name.apply_to(&mut user.last_name);
        self.email.apply_to(&mut user.email);
        self.phone.apply_to(&mut user.phone);
    }
}

/// Listing filters: case-insensitive substring matches on the names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserFilters {
    pub first_name: String,
    pub last_name: String,
}

impl ToFilterPredicate for UserFilters {
    fn to_predicate(&self) -> FilterPredicate {
        FilterBuilder::new()
            .contains("first_name", &self.first_name)
            .contains("last_name", &self.last_name)
            .build()
    }
}
