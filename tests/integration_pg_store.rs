//! Runs against a real database: `cargo test --features postgres-tests`
//! with `DATABASE_URL` pointing at a server where tests may create databases.
#![cfg(feature = "postgres-tests")]

use coursebook_core::{FailureKind, StoreError};
use coursebook_db::{PgStore, Store};
use coursebook_models::{CourseChanges, CourseId, NewCourse, NewUser, UserId};
use sqlx::PgPool;

fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: "Test".into(),
        last_name: "User".into(),
        email_address: email.into(),
        password_hash: "$2b$04$abcdefghijklmnopqrstuuF6Fd9o3Kk6jJ0s5uW3c1oZJ8m2hQeG".into(),
    }
}

fn new_course(title: &str, owner: UserId) -> NewCourse {
    NewCourse {
        title: title.into(),
        description: "D".into(),
        estimated_time: None,
        materials_needed: Some("wood".into()),
        user_id: owner,
    }
}

fn assert_unique_violation(err: StoreError, field: &str) {
    let StoreError::Rejected(failure) = err else {
        panic!("expected a rejection, got {err:?}");
    };
    assert_eq!(failure.kind, FailureKind::UniqueViolation);
    assert_eq!(failure.violations[0].field, field);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_maps_to_unique_violation(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_user(new_user("a@b.com")).await.unwrap();

    let err = store.create_user(new_user("a@b.com")).await.unwrap_err();
    assert_unique_violation(err, "emailAddress");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_title_maps_to_unique_violation(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = store.create_user(new_user("a@b.com")).await.unwrap();
    store.create_course(new_course("T", owner.id)).await.unwrap();

    let err = store.create_course(new_course("T", owner.id)).await.unwrap_err();
    assert_unique_violation(err, "title");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_long_text_values_are_stored(pool: PgPool) {
    let store = PgStore::new(pool);
    let mut user = new_user(&format!("{}@example.com", "a".repeat(300)));
    user.first_name = "F".repeat(300);
    let owner = store.create_user(user).await.unwrap();

    let mut course = new_course(&"T".repeat(300), owner.id);
    course.estimated_time = Some("E".repeat(300));
    course.materials_needed = Some("M".repeat(1000));
    let created = store.create_course(course).await.unwrap();
    assert_eq!(created.title.len(), 300);
    assert_eq!(created.materials_needed.map(|m| m.len()), Some(1000));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_courses_join_owner_and_order_by_id(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = store.create_user(new_user("a@b.com")).await.unwrap();
    let first = store.create_course(new_course("B", owner.id)).await.unwrap();
    let second = store.create_course(new_course("A", owner.id)).await.unwrap();

    let courses = store.find_all_courses().await.unwrap();
    let ids: Vec<CourseId> = courses.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(courses[0].owner, owner.to_public());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_keeps_absent_and_clears_null_optionals(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = store.create_user(new_user("a@b.com")).await.unwrap();
    let course = store.create_course(new_course("T", owner.id)).await.unwrap();

    let updated = store
        .update_course(
            course.id,
            CourseChanges {
                title: "T2".into(),
                description: "D2".into(),
                estimated_time: Some(Some("2 hours".into())),
                materials_needed: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.estimated_time.as_deref(), Some("2 hours"));
    assert_eq!(updated.materials_needed.as_deref(), Some("wood"));

    let cleared = store
        .update_course(
            course.id,
            CourseChanges {
                title: "T2".into(),
                description: "D2".into(),
                estimated_time: None,
                materials_needed: Some(None),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.estimated_time.as_deref(), Some("2 hours"));
    assert!(cleared.materials_needed.is_none());

    let missing = store
        .update_course(
            CourseId::new(course.id.into_inner() + 100),
            CourseChanges {
                title: "X".into(),
                description: "Y".into(),
                estimated_time: None,
                materials_needed: None,
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_and_lookup(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = store.create_user(new_user("a@b.com")).await.unwrap();
    let course = store.create_course(new_course("T", owner.id)).await.unwrap();

    assert!(store.find_course_by_id(course.id).await.unwrap().is_some());
    store.delete_course(course.id).await.unwrap();
    store.delete_course(course.id).await.unwrap();
    assert!(store.find_course_by_id(course.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_lookups(pool: PgPool) {
    let store = PgStore::new(pool);
    let created = store.create_user(new_user("a@b.com")).await.unwrap();

    let by_email = store.find_user_by_email("a@b.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);
    assert!(store.find_user_by_email("A@B.COM").await.unwrap().is_none());

    let by_id = store.find_user_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email_address, "a@b.com");
}
