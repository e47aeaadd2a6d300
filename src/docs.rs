use coursebook_core::errors::{ErrorResponse, UniqueErrorResponse, ValidationErrorResponse};
use coursebook_models::{
    CourseId, CourseWithOwner, CreateCourseDto, CreateUserDto, PublicUser, UpdateCourseDto, UserId,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::get_current_user,
        crate::modules::users::controller::create_user,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
    ),
    components(
        schemas(
            UserId,
            CourseId,
            PublicUser,
            CreateUserDto,
            CourseWithOwner,
            CreateCourseDto,
            UpdateCourseDto,
            ErrorResponse,
            ValidationErrorResponse,
            UniqueErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration and the authenticated user"),
        (name = "Courses", description = "Course catalogue; writes are limited to the course owner")
    ),
    info(
        title = "Coursebook API",
        version = "0.1.0",
        description = "REST API for users and the courses they own, secured with HTTP Basic authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            )
        }
    }
}
