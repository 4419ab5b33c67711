//! Generic lock-protected row store backing the in-memory repositories.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::{Course, Enrollment, User};
use crate::domain::filter::{FilterPredicate, Filterable};
use crate::error::AppError;

/// An entity the in-memory store can hold.
pub trait Record: Filterable + Clone + Send + Sync {
    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for Course {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for Enrollment {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Rows of one entity type.
///
/// Listing order is `created_at` descending, then `id` descending, the same
/// order the PostgreSQL repositories use.
pub struct InMemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for InMemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> InMemoryTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if a row with the same id exists,
    /// mirroring a primary key violation.
    pub async fn insert(&self, row: T) -> Result<T, AppError> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|r| r.id() == row.id()) {
            return Err(AppError::persistence(
                "Database error",
                format!("duplicate id '{}'", row.id()),
            ));
        }

        rows.push(row.clone());
        Ok(row)
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.rows.read().await.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn list(&self, filters: &FilterPredicate, offset: i64, limit: i64) -> Vec<T> {
        let rows = self.rows.read().await;

        let mut matching: Vec<&T> = rows.iter().filter(|r| filters.matches(*r)).collect();
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(a.id()))
        });

        matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect()
    }

    pub async fn count(&self, filters: &FilterPredicate) -> i64 {
        let rows = self.rows.read().await;
        let count = rows.iter().filter(|r| filters.matches(*r)).count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    /// Applies `change` to the row with `id` and returns the result.
    pub async fn update<F>(&self, id: &str, change: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|r| r.id() == id)?;
        change(row);
        Some(row.clone())
    }

    pub async fn remove(&self, id: &str) -> bool {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        rows.len() != before
    }

    /// Read access to every row, in insertion order.
    pub async fn snapshot(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }
}
