//! HTTP Basic authentication.
//!
//! [`AuthUser`] is the extractor protected handlers take. It parses the
//! `Authorization: Basic` header, resolves the user by email address and
//! verifies the password against the stored bcrypt hash. Every failure is
//! answered with the same 401 body; the specific reason only reaches the
//! logs and the `auth_failures_total` counter.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use coursebook_core::{AppError, password::verify_password};
use coursebook_db::Store;
use coursebook_models::PublicUser;
use std::fmt;
use tracing::{debug, instrument, warn};

use crate::metrics::track_auth_failure;
use crate::state::AppState;

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

#[derive(Clone)]
pub struct BasicCredentials {
    pub identifier: String,
    pub secret: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingCredentials,
    IdentityNotFound,
    InvalidSecret,
}

impl AuthFailure {
    pub fn reason(self) -> &'static str {
        match self {
            AuthFailure::MissingCredentials => "missing credentials",
            AuthFailure::IdentityNotFound => "identity not found",
            AuthFailure::InvalidSecret => "invalid secret",
        }
    }
}

fn deny(failure: AuthFailure) -> AppError {
    warn!(reason = failure.reason(), "authentication failed");
    track_auth_failure(failure.reason());
    AppError::Unauthorized
}

/// Parses `Authorization: Basic ...`; `None` when absent or malformed.
pub fn basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let Authorization(basic) = headers.typed_get::<Authorization<Basic>>()?;
    Some(BasicCredentials {
        identifier: basic.username().to_string(),
        secret: basic.password().to_string(),
    })
}

/// Resolves credentials to a user.
///
/// Store failures and unreadable password hashes are internal errors, not
/// authentication failures.
#[instrument(skip(store))]
pub async fn authenticate(
    store: &dyn Store,
    credentials: Option<BasicCredentials>,
) -> Result<PublicUser, AppError> {
    let Some(credentials) = credentials else {
        return Err(deny(AuthFailure::MissingCredentials));
    };

    let Some(record) = store.find_user_by_email(&credentials.identifier).await? else {
        return Err(deny(AuthFailure::IdentityNotFound));
    };

    if !verify_password(&credentials.secret, &record.password_hash)? {
        return Err(deny(AuthFailure::InvalidSecret));
    }

    debug!(user_id = %record.id, "authenticated");
    Ok(record.to_public())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = basic_credentials(&parts.headers);
        authenticate(state.store.as_ref(), credentials)
            .await
            .map(AuthUser)
    }
}
