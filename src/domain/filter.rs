//! Storage-independent description of listing filters.
//!
//! Raw query fields are normalized once by [`FilterBuilder`] into a
//! [`FilterPredicate`], which a repository uses for both the page query
//! and the count query. Repositories translate it into their native form:
//! PostgreSQL into `column ILIKE` clauses, the in-memory store through
//! [`Filterable`].
//!
//! Case folding for `contains` is Unicode `to_lowercase` in memory and the
//! database collation in PostgreSQL. Both agree on ASCII; locale-dependent
//! mappings such as `ß` or Turkish `İ` may match differently.
//!
//! Blank input (empty or whitespace-only) never produces a condition, so a
//! request with `?name=` lists exactly what a request without `name` lists.

/// How a condition's pattern is compared with the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring match. The pattern is stored lower-cased.
    Contains,
    /// Byte-for-byte equality.
    Exact,
}

/// A single normalized field condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: &'static str,
    pub pattern: String,
    pub mode: MatchMode,
}

impl FilterCondition {
    /// Evaluates the condition against a stored value.
    pub fn matches(&self, value: &str) -> bool {
        match self.mode {
            MatchMode::Contains => value.to_lowercase().contains(&self.pattern),
            MatchMode::Exact => value == self.pattern,
        }
    }
}

/// Conjunction of field conditions; empty means "match everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    conditions: Vec<FilterCondition>,
}

impl FilterPredicate {
    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns true if `item` satisfies every condition.
    ///
    /// A condition on a field the item does not expose (or exposes as
    /// `None`) does not match.
    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        self.conditions.iter().all(|condition| {
            item.field_value(condition.field)
                .is_some_and(|value| condition.matches(value))
        })
    }
}

/// Exposes filterable string fields of an entity by column name.
pub trait Filterable {
    fn field_value(&self, field: &str) -> Option<&str>;
}

/// Raw per-resource filter fields decoded from a query string.
pub trait ToFilterPredicate {
    fn to_predicate(&self) -> FilterPredicate;
}

/// Accumulates raw filter fields into a [`FilterPredicate`].
///
/// # Examples
///
/// ```
/// use campus_registry::domain::filter::{FilterBuilder, MatchMode};
///
/// let predicate = FilterBuilder::new()
///     .contains("name", "  Rust ")
///     .contains("start_date", "")
///     .build();
///
/// assert_eq!(predicate.conditions().len(), 1);
/// assert_eq!(predicate.conditions()[0].pattern, "rust");
/// assert_eq!(predicate.conditions()[0].mode, MatchMode::Contains);
/// ```
#[derive(Debug, Default)]
pub struct FilterBuilder {
    conditions: Vec<FilterCondition>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a case-insensitive substring condition unless `raw` is blank.
    pub fn contains(self, field: &'static str, raw: &str) -> Self {
        let needle = raw.trim();
        if needle.is_empty() {
            return self;
        }
        self.push(field, needle.to_lowercase(), MatchMode::Contains)
    }

    /// Adds an equality condition unless `raw` is blank.
    pub fn exact(self, field: &'static str, raw: &str) -> Self {
        let value = raw.trim();
        if value.is_empty() {
            return self;
        }
        self.push(field, value.to_string(), MatchMode::Exact)
    }

    pub fn build(self) -> FilterPredicate {
        FilterPredicate {
            conditions: self.conditions,
        }
    }

    fn push(mut self, field: &'static str, pattern: String, mode: MatchMode) -> Self {
        self.conditions.push(FilterCondition {
            field,
            pattern,
            mode,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: String,
        code: Option<String>,
    }

    impl Filterable for Row {
        fn field_value(&self, field: &str) -> Option<&str> {
            match field {
                "name" => Some(&self.name),
                "code" => self.code.as_deref(),
                _ => None,
            }
        }
    }

    fn row(name: &str, code: Option<&str>) -> Row {
        Row {
            name: name.to_string(),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn test_blank_fields_are_dropped() {
        let predicate = FilterBuilder::new()
            .contains("name", "")
            .contains("other", "   ")
            .exact("code", "")
            .build();

        assert!(predicate.is_empty());
        assert_eq!(predicate, FilterPredicate::default());
    }

    #[test]
    fn test_contains_is_case_folded() {
        let predicate = FilterBuilder::new().contains("name", "GoLang").build();

        assert_eq!(predicate.conditions()[0].pattern, "golang");
        assert!(predicate.matches(&row("Intro to Golang", None)));
        assert!(!predicate.matches(&row("Intro to Rust", None)));
    }

    #[test]
    fn test_exact_keeps_case() {
        let predicate = FilterBuilder::new().exact("code", "AbC").build();

        assert!(predicate.matches(&row("x", Some("AbC"))));
        assert!(!predicate.matches(&row("x", Some("abc"))));
    }

    #[test]
    fn test_conditions_are_conjunctive() {
        let predicate = FilterBuilder::new()
            .contains("name", "intro")
            .exact("code", "c1")
            .build();

        assert!(predicate.matches(&row("Intro", Some("c1"))));
        assert!(!predicate.matches(&row("Intro", Some("c2"))));
        assert!(!predicate.matches(&row("Advanced", Some("c1"))));
    }

    #[test]
    fn test_missing_field_does_not_match() {
        let predicate = FilterBuilder::new().contains("code", "c").build();
        assert!(!predicate.matches(&row("x", None)));
    }

    #[test]
    fn test_empty_predicate_matches_everything() {
        assert!(FilterPredicate::default().matches(&row("anything", None)));
    }
}
