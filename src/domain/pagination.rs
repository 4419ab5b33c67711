//! Pagination calculator shared by every listing endpoint.
//!
//! # Policy
//!
//! - `page` omitted → 1
//! - `limit` omitted → [`PaginationPolicy::default_limit`]
//! - `limit` above [`PaginationPolicy::max_limit`] → clamped to the maximum
//! - `page` or `limit` explicitly below 1 → [`AppError::InvalidPagination`]
//! - a page past the last one is kept as requested and simply yields no rows
//!
//! Resolution happens in two steps so the offset is known before the total
//! count: [`PageRequest::resolve`] validates the caller's input, then
//! [`PageRequest::meta`] attaches the count. [`compute`] chains both.

use serde::Serialize;

use crate::error::AppError;

/// Limits applied to caller-supplied page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPolicy {
    pub default_limit: i64,
    pub max_limit: i64,
}

impl PaginationPolicy {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    pub fn new(default_limit: i64, max_limit: i64) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, Self::MAX_LIMIT)
    }
}

/// A validated page/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Applies defaults and bounds to raw page/limit input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidPagination`] when `page` or `limit` is
    /// supplied with a value below 1.
    pub fn resolve(
        page: Option<i64>,
        limit: Option<i64>,
        policy: &PaginationPolicy,
    ) -> Result<Self, AppError> {
        let page = match page {
            None => 1,
            Some(p) if p < 1 => {
                return Err(AppError::invalid_pagination("page must be greater than 0"));
            }
            Some(p) => p,
        };

        let limit = match limit {
            None => policy.default_limit,
            Some(l) if l < 1 => {
                return Err(AppError::invalid_pagination("limit must be greater than 0"));
            }
            Some(l) => l.min(policy.max_limit),
        };

        Ok(Self { page, limit })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Builds the metadata block for a listing with `total` matching rows.
    pub fn meta(&self, total: i64) -> PageMeta {
        let total = total.max(0);
        let total_pages = total / self.limit + i64::from(total % self.limit != 0);

        PageMeta {
            page: self.page,
            limit: self.limit,
            total,
            total_pages,
            offset: self.offset(),
        }
    }
}

/// Pagination summary attached to listing responses.
///
/// `offset` is kept for callers that query storage but is not serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    #[serde(skip)]
    pub offset: i64,
}

/// Computes pagination metadata from raw page/limit input and a total count.
///
/// # Errors
///
/// See [`PageRequest::resolve`].
pub fn compute(
    page: Option<i64>,
    limit: Option<i64>,
    total: i64,
    policy: &PaginationPolicy,
) -> Result<PageMeta, AppError> {
    Ok(PageRequest::resolve(page, limit, policy)?.meta(total))
}
