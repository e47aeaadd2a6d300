mod common;

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::http::StatusCode;
use common::{request, send, setup_app_with_store, setup_test_app};
use coursebook_core::StoreError;
use coursebook_db::Store;
use coursebook_models::{
    Course, CourseChanges, CourseId, CourseWithOwner, NewCourse, NewUser, PublicUser, UserId,
    UserRecord,
};
use serde_json::json;

/// Store whose reads fail or panic, for exercising the 500 paths.
struct BrokenStore {
    panic: bool,
}

impl BrokenStore {
    fn fail<T>(&self) -> Result<T, StoreError> {
        if self.panic {
            panic!("store exploded");
        }
        Err(StoreError::Unexpected(anyhow!(
            "connection to 10.1.2.3:5432 refused"
        )))
    }
}

#[async_trait]
impl Store for BrokenStore {
    async fn find_user_by_email(&self, _email: &str) -> Result<Option<UserRecord>, StoreError> {
        self.fail()
    }

    async fn find_user_by_id(&self, _id: UserId) -> Result<Option<PublicUser>, StoreError> {
        self.fail()
    }

    async fn create_user(&self, _user: NewUser) -> Result<UserRecord, StoreError> {
        self.fail()
    }

    async fn find_course_by_id(
        &self,
        _id: CourseId,
    ) -> Result<Option<CourseWithOwner>, StoreError> {
        self.fail()
    }

    async fn find_all_courses(&self) -> Result<Vec<CourseWithOwner>, StoreError> {
        self.fail()
    }

    async fn create_course(&self, _course: NewCourse) -> Result<Course, StoreError> {
        self.fail()
    }

    async fn update_course(
        &self,
        _id: CourseId,
        _changes: CourseChanges,
    ) -> Result<Option<Course>, StoreError> {
        self.fail()
    }

    async fn delete_course(&self, _id: CourseId) -> Result<(), StoreError> {
        self.fail()
    }
}

#[tokio::test]
async fn test_welcome_message() {
    let app = setup_test_app();

    let response = send(&app.router, request("GET", "/", None, None)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["message"].as_str().unwrap().contains("Welcome"));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = setup_test_app();

    let response = send(&app.router, request("GET", "/api/nothing-here", None, None)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "message": "Route Not Found" }));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app();

    let response = send(&app.router, request("GET", "/api-docs/openapi.json", None, None)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["info"]["title"], "Coursebook API");
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let router = setup_app_with_store(Arc::new(BrokenStore { panic: false }));

    let response = send(&router, request("GET", "/api/courses", None, None)).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({ "message": "An unexpected error occurred" })
    );
}

#[tokio::test]
async fn test_store_failure_during_auth_is_500_not_401() {
    let router = setup_app_with_store(Arc::new(BrokenStore { panic: false }));

    let response = send(
        &router,
        request("GET", "/api/users", None, Some(("a@b.com", "pw"))),
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_handler_panic_is_generic_500() {
    let router = setup_app_with_store(Arc::new(BrokenStore { panic: true }));

    let response = send(&router, request("GET", "/api/courses/1", None, None)).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({ "message": "An unexpected error occurred" })
    );
}
