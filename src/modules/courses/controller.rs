use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use coursebook_core::AppError;
use coursebook_core::errors::{ErrorResponse, ValidationErrorResponse};
use tracing::{debug, instrument};

use crate::middleware::auth::AuthUser;
use crate::modules::courses::model::{
    CourseId, CourseWithOwner, CreateCourseDto, INDICATED_NOT_FOUND, REQUESTED_NOT_FOUND,
    UpdateCourseDto,
};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::{OptionalJson, ValidatedJson};

/// A path segment that is not an integer names no course.
fn parse_course_id(raw: &str, not_found: &'static str) -> Result<CourseId, AppError> {
    raw.parse().map_err(|_| {
        debug!(raw, "non-numeric course id");
        AppError::not_found(not_found)
    })
}

/// List all courses
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Every course with its owner, ordered by id", body = Vec<CourseWithOwner>),
        (status = 404, description = "There are no courses yet", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseWithOwner>>, AppError> {
    let courses = CourseService::list(state.store.as_ref()).await?;
    Ok(Json(courses))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "The course with its owner", body = CourseWithOwner),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseWithOwner>, AppError> {
    let id = parse_course_id(&id, REQUESTED_NOT_FOUND)?;
    let course = CourseService::get(state.store.as_ref(), id).await?;
    Ok(Json(course))
}

/// Create a course owned by the caller
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", headers(("Location" = String, description = "URI of the new course"))),
        (status = 400, description = "Missing fields, or the title is already in use (`{message, field}`)", body = ValidationErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse)
    ),
    security(("basic_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let course = CourseService::create(state.store.as_ref(), user.id, dto).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/courses/{}", course.id))],
    ))
}

/// Update a course owned by the caller
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course id")),
    request_body = UpdateCourseDto,
    responses(
        (status = 204, description = "Course updated"),
        (status = 400, description = "Title or description missing, or the title is already in use", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "The caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("basic_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    OptionalJson(dto): OptionalJson<UpdateCourseDto>,
) -> Result<StatusCode, AppError> {
    let id = parse_course_id(&id, INDICATED_NOT_FOUND)?;
    CourseService::update(state.store.as_ref(), user.id, id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a course owned by the caller
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "The caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("basic_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_course_id(&id, INDICATED_NOT_FOUND)?;
    CourseService::delete(state.store.as_ref(), user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_are_not_found() {
        for raw in ["abc", "1.5", "", "99999999999999999999"] {
            assert!(matches!(
                parse_course_id(raw, REQUESTED_NOT_FOUND),
                Err(AppError::NotFound(m)) if m == REQUESTED_NOT_FOUND
            ));
        }
        assert_eq!(
            parse_course_id("12", REQUESTED_NOT_FOUND).unwrap(),
            CourseId::new(12)
        );
    }
}
