#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode, header};
use axum_extra::headers::{Authorization, HeaderMapExt};
use coursebook::{AppState, init_router};
use coursebook_config::CorsConfig;
use coursebook_config::password::MIN_HASH_COST;
use coursebook_db::{MemoryStore, Store};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `Value::Null` when the response has no body.
    pub body: Value,
}

pub fn test_cors_config() -> CorsConfig {
    CorsConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
    }
}

/// Router backed by an in-memory store with the cheapest bcrypt cost.
pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    TestApp {
        router: setup_app_with_store(store.clone()),
        store,
    }
}

pub fn setup_app_with_store(store: Arc<dyn Store>) -> Router {
    init_router(AppState::new(store, MIN_HASH_COST, test_cors_config()))
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", uuid::Uuid::new_v4())
}

pub fn basic_auth(email: &str, password: &str) -> HeaderValue {
    let mut headers = HeaderMap::new();
    headers.typed_insert(Authorization::basic(email, password));
    headers
        .remove(header::AUTHORIZATION)
        .expect("typed_insert sets the header")
}

pub fn request(
    method: &str,
    uri: &str,
    body: Option<Value>,
    auth: Option<(&str, &str)>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((email, password)) = auth {
        builder = builder.header(header::AUTHORIZATION, basic_auth(email, password));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn location(response: &TestResponse) -> &str {
    response
        .headers
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Location header")
}

/// Registers a user through the API and returns the email used.
pub async fn register_user(router: &Router, password: &str) -> String {
    let email = generate_unique_email();
    let response = send(
        router,
        request(
            "POST",
            "/api/users",
            Some(json!({
                "firstName": "Test",
                "lastName": "User",
                "emailAddress": email,
                "password": password,
            })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    email
}

/// Creates a course as `email` and returns its id.
pub async fn create_course(router: &Router, email: &str, password: &str, title: &str) -> i64 {
    let response = send(
        router,
        request(
            "POST",
            "/api/courses",
            Some(json!({ "title": title, "description": "A description" })),
            Some((email, password)),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    location(&response)
        .trim_start_matches("/api/courses/")
        .parse()
        .unwrap()
}
