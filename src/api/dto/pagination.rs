//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

/// `page` and `limit` as sent in the query string.
///
/// An empty value (`?page=`) is treated as omitted. Bounds are applied by
/// [`crate::domain::pagination::PageRequest::resolve`].
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::Query;
    use axum::extract::rejection::QueryRejection;
    use axum::http::Uri;

    fn parse(query: &str) -> Result<PaginationParams, QueryRejection> {
        let uri: Uri = format!("/courses?{query}").parse().unwrap();
        Query::try_from_uri(&uri).map(|Query(params)| params)
    }

    #[test]
    fn test_numbers() {
        let params = parse("page=3&limit=50").unwrap();
        assert_eq!(params.page, Some(3));
        assert_eq!(params.limit, Some(50));
    }

    #[test]
    fn test_empty_and_missing_are_none() {
        let params = parse("page=&name=rust").unwrap();
        assert_eq!(params.page, None);
        assert_eq!(params.limit, None);
    }

    #[test]
    fn test_non_numeric_is_error() {
        assert!(parse("limit=ten").is_err());
    }
}
