//! PostgreSQL repository tests. Each test gets a fresh database with the
//! crate's migrations applied; `DATABASE_URL` must point at a server.

use std::sync::Arc;

use campus_registry::domain::entities::{
    Course, CoursePatch, Enrollment, EnrollmentPatch, EnrollmentStatus, User, UserPatch,
};
use campus_registry::domain::filter::{FilterBuilder, FilterPredicate};
use campus_registry::domain::patch::Patch;
use campus_registry::domain::repositories::{
    CourseRepository, EnrollmentRepository, UserRepository,
};
use campus_registry::infrastructure::persistence::{
    PgCourseRepository, PgEnrollmentRepository, PgUserRepository,
};
use chrono::Utc;
use sqlx::PgPool;

fn user(id: &str, first_name: &str, last_name: &str) -> User {
    let now = Utc::now();
    User {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: Some(format!("{id}@example.com")),
        phone: None,
        created_at: now,
        updated_at: now,
    }
}

fn course(id: &str, name: &str) -> Course {
    let now = Utc::now();
    Course {
        id: id.to_string(),
        name: name.to_string(),
        start_date: "2025-03-01".to_string(),
        end_date: "2025-06-30".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn enrollment(id: &str, user_id: &str, course_id: &str, status: EnrollmentStatus) -> Enrollment {
    let now = Utc::now();
    Enrollment {
        id: id.to_string(),
        user_id: user_id.to_string(),
        course_id: course_id.to_string(),
        status,
        created_at: now,
        updated_at: now,
    }
}

// ─── USERS ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_user_create_and_find(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let created = repo.create(user("u1", "Ada", "Lovelace")).await.unwrap();
    assert_eq!(created.id, "u1");
    assert_eq!(created.email.as_deref(), Some("u1@example.com"));

    let found = repo.find_by_id("u1").await.unwrap().unwrap();
    assert_eq!(found.first_name, "Ada");
    assert!(found.phone.is_none());

    assert!(repo.find_by_id("missing").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_user_filter_and_count(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(user("u1", "Jane", "Roe")).await.unwrap();
    repo.create(user("u2", "Janet", "Moe")).await.unwrap();
    repo.create(user("u3", "John", "Doe")).await.unwrap();

    let filters = FilterBuilder::new().contains("first_name", "JAN").build();

    let users = repo.list(&filters, 0, 10).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(repo.count(&filters).await.unwrap(), 2);
    assert_eq!(repo.count(&FilterPredicate::default()).await.unwrap(), 3);

    let page = repo.list(&FilterPredicate::default(), 2, 2).await.unwrap();
    assert_eq!(page.len(), 1);
}

#[sqlx::test]
async fn test_user_filter_escapes_wildcards(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(user("u1", "100%", "Roe")).await.unwrap();
    repo.create(user("u2", "1000", "Moe")).await.unwrap();

    let filters = FilterBuilder::new().contains("first_name", "0%").build();

    assert_eq!(repo.count(&filters).await.unwrap(), 1);
}

#[sqlx::test]
async fn test_user_update_patch(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(user("u1", "Jane", "Roe")).await.unwrap();

    let patch = UserPatch {
        last_name: Patch::Present("Doe".to_string()),
        email: Patch::Present(None),
        ..Default::default()
    };
    let updated = repo.update("u1", patch).await.unwrap().unwrap();

    assert_eq!(updated.first_name, "Jane");
    assert_eq!(updated.last_name, "Doe");
    assert!(updated.email.is_none());
    assert!(updated.updated_at >= updated.created_at);

    let unchanged = repo.update("u1", UserPatch::default()).await.unwrap().unwrap();
    assert_eq!(unchanged.last_name, "Doe");

    assert!(repo.update("missing", UserPatch::default()).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_user_delete(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(user("u1", "Jane", "Roe")).await.unwrap();

    assert!(repo.delete("u1").await.unwrap());
    assert!(!repo.delete("u1").await.unwrap());
    assert!(repo.find_by_id("u1").await.unwrap().is_none());
}

// ─── COURSES ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_course_crud(pool: PgPool) {
    let repo = PgCourseRepository::new(Arc::new(pool));

    repo.create(course("c1", "Rust")).await.unwrap();
    repo.create(course("c2", "Go")).await.unwrap();

    let filters = FilterBuilder::new().contains("name", "rus").build();
    let courses = repo.list(&filters, 0, 10).await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, "c1");

    let patch = CoursePatch {
        end_date: Patch::Present("2025-07-31".to_string()),
        ..Default::default()
    };
    let updated = repo.update("c1", patch).await.unwrap().unwrap();
    assert_eq!(updated.name, "Rust");
    assert_eq!(updated.end_date, "2025-07-31");

    assert!(repo.delete("c2").await.unwrap());
    assert_eq!(repo.count(&FilterPredicate::default()).await.unwrap(), 1);
}

// ─── ENROLLMENTS ──────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_enrollment_exact_filter(pool: PgPool) {
    let repo = PgEnrollmentRepository::new(Arc::new(pool));

    repo.create(enrollment("e1", "u1", "c1", EnrollmentStatus::Pending))
        .await
        .unwrap();
    repo.create(enrollment("e2", "u10", "c1", EnrollmentStatus::Pending))
        .await
        .unwrap();

    let filters = FilterBuilder::new().exact("user_id", "u1").build();
    let enrollments = repo.list(&filters, 0, 10).await.unwrap();

    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].id, "e1");
    assert_eq!(enrollments[0].status, EnrollmentStatus::Pending);
}

#[sqlx::test]
async fn test_enrollment_update_status(pool: PgPool) {
    let repo = PgEnrollmentRepository::new(Arc::new(pool));
    repo.create(enrollment("e1", "u1", "c1", EnrollmentStatus::Pending))
        .await
        .unwrap();

    let patch = EnrollmentPatch {
        status: Patch::Present(EnrollmentStatus::Active),
    };
    let updated = repo.update("e1", patch).await.unwrap().unwrap();

    assert_eq!(updated.status, EnrollmentStatus::Active);
    assert_eq!(updated.user_id, "u1");
}

#[sqlx::test]
async fn test_enrollment_count_by_status(pool: PgPool) {
    let repo = PgEnrollmentRepository::new(Arc::new(pool));

    repo.create(enrollment("e1", "u1", "c1", EnrollmentStatus::Pending))
        .await
        .unwrap();
    repo.create(enrollment("e2", "u2", "c1", EnrollmentStatus::Pending))
        .await
        .unwrap();
    repo.create(enrollment("e3", "u3", "c1", EnrollmentStatus::Studying))
        .await
        .unwrap();

    let counts = repo.count_by_status().await.unwrap();

    assert!(counts.contains(&(EnrollmentStatus::Pending, 2)));
    assert!(counts.contains(&(EnrollmentStatus::Studying, 1)));
    assert_eq!(counts.len(), 2);
}

#[sqlx::test]
async fn test_enrollment_rejects_unknown_status_column(pool: PgPool) {
    let err = sqlx::query(
        "INSERT INTO enrollments (id, user_id, course_id, status, created_at, updated_at) \
         VALUES ('e1', 'u1', 'c1', 'X', NOW(), NOW())",
    )
    .execute(&pool)
    .await;

    assert!(err.is_err());
}
