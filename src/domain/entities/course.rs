//! Course entity and its commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::filter::{FilterBuilder, FilterPredicate, Filterable, ToFilterPredicate};
use crate::domain::patch::Patch;

/// A course users can enroll in.
///
/// Dates are kept as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Filterable for Course {
    fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "start_date" => Some(&self.start_date),
            "end_date" => Some(&self.end_date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewCourse {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

/// Partial update of a course. Every field is required on the entity, so
/// none of them may be set to an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoursePatch {
    pub name: Patch<String>,
    pub start_date: Patch<String>,
    pub end_date: Patch<String>,
}

impl CoursePatch {
    pub fn is_empty(&self) -> bool {
        !(self.name.is_present() || self.start_date.is_present() || self.end_date.is_present())
    }

    pub fn apply(self, course: &mut Course) {
        self.name.apply_to(&mut course.name);
        self.start_date.apply_to(&mut course.start_date);
        self.end_date.apply_to(&mut course.end_date);
    }
}

/// Listing filters: case-insensitive substring matches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CourseFilters {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

impl ToFilterPredicate for CourseFilters {
    fn to_predicate(&self) -> FilterPredicate {
        FilterBuilder::new()
            .contains("name", &self.name)
            .contains("start_date", &self.start_date)
            .contains("end_date", &self.end_date)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_filter_is_no_filter() {
        let filters = CourseFilters {
            name: String::new(),
            ..Default::default()
        };

        assert!(filters.to_predicate().is_empty());
    }

    #[test]
    fn test_date_filters() {
        let now = Utc::now();
        let course = Course {
            id: "c1".to_string(),
            name: "Rust".to_string(),
            start_date: "2025-03-01".to_string(),
            end_date: "2025-06-30".to_string(),
            created_at: now,
            updated_at: now,
        };

        let march = CourseFilters {
            start_date: "2025-03".to_string(),
            ..Default::default()
        };
        let july = CourseFilters {
            end_date: "2025-07".to_string(),
            ..Default::default()
        };

        assert!(march.to_predicate().matches(&course));
        assert!(!july.to_predicate().matches(&course));
    }

    #[test]
    fn test_patch_apply() {
        let now = Utc::now();
        let mut course = Course {
            id: "c1".to_string(),
            name: "Rust".to_string(),
            start_date: "2025-03-01".to_string(),
            end_date: "2025-06-30".to_string(),
            created_at: now,
            updated_at: now,
        };

        CoursePatch {
            end_date: Patch::Present("2025-07-31".to_string()),
            ..Default::default()
        }
        .apply(&mut course);

        assert_eq!(course.name, "Rust");
        assert_eq!(course.end_date, "2025-07-31");
    }
}
