//! # Coursebook Models
//!
//! Domain models and DTOs shared by the API, the store implementations and
//! the CLI.
//!
//! - [`ids`]: strongly-typed integer identifiers
//! - [`users`]: stored user records, the public user projection and the
//!   registration payload
//! - [`courses`]: courses, courses joined with their owner, and the
//!   create/update payloads
//! - [`validation`]: turns `validator` output into an ordered
//!   [`ValidationFailure`](coursebook_core::ValidationFailure)

pub mod courses;
pub mod ids;
pub mod users;
pub mod validation;

pub use courses::{
    Course, CourseChanges, CourseRow, CourseWithOwner, CreateCourseDto, NewCourse, UpdateCourseDto,
};
pub use ids::{CourseId, UserId};
pub use users::{CreateUserDto, NewUser, PublicUser, UserRecord};
pub use validation::{FieldOrder, validate_ordered};
