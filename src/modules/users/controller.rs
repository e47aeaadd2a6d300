use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use coursebook_core::AppError;
use coursebook_core::errors::{ErrorResponse, ValidationErrorResponse};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::{CreateUserDto, PublicUser};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::JsonBody;

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "The authenticated user", body = PublicUser),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse)
    ),
    security(("basic_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = UserService::current_user(state.store.as_ref(), user.id).await?;
    Ok(Json(user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", headers(("Location" = String, description = "Always `/`"))),
        (status = 400, description = "Missing or invalid fields, or the email address is already in use (`{message, field}`)", body = ValidationErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    UserService::register(state.store.as_ref(), state.hash_cost, dto).await?;
    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}
