//! Translation of [`FilterPredicate`] into SQL.
//!
//! `contains` conditions use `ILIKE`, so PostgreSQL folds both the column
//! and the pattern under the database collation. The in-memory store folds
//! with Unicode `to_lowercase`; the two agree on ASCII but may differ on
//! letters whose case mapping is locale dependent (`ß`, Turkish `İ`).

use sqlx::{Postgres, QueryBuilder};

use crate::domain::filter::{FilterPredicate, MatchMode};

/// Appends a `WHERE` clause for `filters`; nothing for an empty predicate.
///
/// Column names come from [`crate::domain::filter::FilterCondition::field`],
/// which is always a compile-time constant. Patterns are bound, never
/// interpolated.
pub(crate) fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &FilterPredicate) {
    for (i, condition) in filters.conditions().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });

        match condition.mode {
            MatchMode::Contains => {
                qb.push(condition.field)
                    .push(" ILIKE ")
                    .push_bind(format!("%{}%", escape_like(&condition.pattern)))
                    .push(" ESCAPE '\\'");
            }
            MatchMode::Exact => {
                qb.push(condition.field)
                    .push(" = ")
                    .push_bind(condition.pattern.clone());
            }
        }
    }
}

/// Stable newest-first order used by every listing.
pub(crate) fn push_page(qb: &mut QueryBuilder<'_, Postgres>, offset: i64, limit: i64) {
    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
}

/// Escapes `LIKE` wildcards so user input is matched literally.
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
