//! Enrollment entity linking a user to a course.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::filter::{FilterBuilder, FilterPredicate, Filterable, ToFilterPredicate};
use crate::domain::patch::Patch;

/// Lifecycle state of an enrollment, serialized as its one-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    #[default]
    #[serde(rename = "P")]
    Pending,
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "S")]
    Studying,
    #[serde(rename = "I")]
    Inactive,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 4] = [
        EnrollmentStatus::Pending,
        EnrollmentStatus::Active,
        EnrollmentStatus::Studying,
        EnrollmentStatus::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "P",
            EnrollmentStatus::Active => "A",
            EnrollmentStatus::Studying => "S",
            EnrollmentStatus::Inactive => "I",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown enrollment status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for EnrollmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnrollmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A user's enrollment in a course.
///
/// The referenced user and course existed when the enrollment was created;
/// nothing keeps them alive afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Filterable for Enrollment {
    fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "id" => Some(&self.id),
            "user_id" => Some(&self.user_id),
            "course_id" => Some(&self.course_id),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewEnrollment {
    pub user_id: String,
    pub course_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EnrollmentPatch {
    pub status: Patch<EnrollmentStatus>,
}

impl EnrollmentPatch {
    pub fn is_empty(&self) -> bool {
        !self.status.is_present()
    }

    pub fn apply(self, enrollment: &mut Enrollment) {
        self.status.apply_to(&mut enrollment.status);
    }
}

/// Listing filters: exact matches on the referenced ids.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnrollmentFilters {
    pub user_id: String,
    pub course_id: String,
}

impl ToFilterPredicate for EnrollmentFilters {
    fn to_predicate(&self) -> FilterPredicate {
        FilterBuilder::new()
            .exact("user_id", &self.user_id)
            .exact("course_id", &self.course_id)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(EnrollmentStatus::default(), EnrollmentStatus::Pending);
        assert_eq!(EnrollmentStatus::Pending.as_str(), "P");
        assert_eq!(
            serde_json::to_value(EnrollmentStatus::Studying).unwrap(),
            "S"
        );
    }

    #[test]
    fn test_status_from_str() {
        for status in EnrollmentStatus::ALL {
            assert_eq!(status.as_str().parse::<EnrollmentStatus>(), Ok(status));
        }
        assert!("X".parse::<EnrollmentStatus>().is_err());
    }

    #[test]
    fn test_patch_rejects_unknown_status() {
        let result = serde_json::from_str::<EnrollmentPatch>(r#"{"status": "X"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_filters_are_exact() {
        let filters = EnrollmentFilters {
            user_id: "U1".to_string(),
            course_id: String::new(),
        };
        let predicate = filters.to_predicate();

        assert_eq!(predicate.conditions().len(), 1);
        assert_eq!(predicate.conditions()[0].pattern, "U1");
    }
}
