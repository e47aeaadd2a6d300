//! JSON body extractors.
//!
//! Axum's own `Json` rejection answers with plain text; these wrappers turn
//! every body problem into the API's `{"message": "Invalid request body"}`.
//! [`OptionalJson`] never rejects a payload, leaving the handler to decide
//! what a missing one means.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use coursebook_core::AppError;
use coursebook_models::{FieldOrder, validate_ordered};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

pub const INVALID_BODY: &str = "Invalid request body";

/// A deserialized JSON body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(rejection = %rejection.body_text(), "rejected request body");
                AppError::bad_request(INVALID_BODY)
            })?;
        Ok(JsonBody(value))
    }
}

/// A JSON body that also passed field validation, with violations reported
/// in field declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        validate_ordered(&value)?;
        Ok(ValidatedJson(value))
    }
}

/// A JSON body that reads as `None` when it is absent, not declared as JSON,
/// or does not deserialize into `T`.
#[derive(Debug, Clone, Default)]
pub struct OptionalJson<T>(pub Option<T>);

impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/") && value.contains("json"));

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            debug!(rejection = %rejection.body_text(), "failed to read request body");
            AppError::bad_request(INVALID_BODY)
        })?;

        if !declared_json || bytes.is_empty() {
            return Ok(OptionalJson(None));
        }
        let value = serde_json::from_slice(&bytes)
            .inspect_err(|err| debug!(error = %err, "unreadable request body"))
            .ok();
        Ok(OptionalJson(value))
    }
}
