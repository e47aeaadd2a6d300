//! Shared building blocks for the Coursebook API.
//!
//! - [`errors`]: the failure taxonomy and its HTTP rendering
//! - [`password`]: bcrypt hashing and verification

pub mod errors;
pub mod password;

pub use errors::{AppError, FailureKind, FieldViolation, StoreError, ValidationFailure};
