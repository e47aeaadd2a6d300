//! Ordered field validation.
//!
//! `validator` reports errors in a hash map, so the order clients see would
//! otherwise be arbitrary. Payloads implement [`FieldOrder`] to list their
//! fields in declaration order together with their JSON names, and
//! [`validate_ordered`] walks that list.

use coursebook_core::{FailureKind, FieldViolation, ValidationFailure};
use validator::{Validate, ValidationError};

/// Declaration order of a payload's fields as `(rust_name, json_name)`.
pub trait FieldOrder {
    const FIELDS: &'static [(&'static str, &'static str)];
}

fn rule_rank(error: &ValidationError) -> u8 {
    match error.code.as_ref() {
        "required" => 0,
        "length" => 1,
        _ => 2,
    }
}

fn is_presence_rule(error: &ValidationError) -> bool {
    matches!(error.code.as_ref(), "required" | "length")
}

/// Validates `value`, reporting every violation in field declaration order.
///
/// The failure kind is [`FailureKind::FieldRequired`] when any field is
/// missing or empty, otherwise [`FailureKind::FieldInvalid`].
pub fn validate_ordered<T>(value: &T) -> Result<(), ValidationFailure>
where
    T: Validate + FieldOrder,
{
    let Err(errors) = value.validate() else {
        return Ok(());
    };
    let by_field = errors.field_errors();

    let mut violations = Vec::new();
    let mut missing = false;
    for (rust_name, json_name) in T::FIELDS {
        let Some(field_errors) = by_field.get(*rust_name) else {
            continue;
        };
        let mut field_errors: Vec<&ValidationError> = field_errors.iter().collect();
        field_errors.sort_by_key(|e| rule_rank(e));

        for error in field_errors {
            missing |= is_presence_rule(error);
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{json_name} is invalid"));
            violations.push(FieldViolation::new(*json_name, message));
        }
    }

    let kind = if missing {
        FailureKind::FieldRequired
    } else {
        FailureKind::FieldInvalid
    };
    Err(ValidationFailure::new(kind, violations))
}
