//! User domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::ids::UserId;
use crate::validation::FieldOrder;

/// A user row as stored, including the password hash.
///
/// Never serialized; handlers only ever expose [`PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email_address: self.email_address.clone(),
        }
    }
}

impl From<UserRecord> for PublicUser {
    fn from(record: UserRecord) -> Self {
        PublicUser {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email_address: record.email_address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

/// Email syntax check that also requires a dotted domain ending in an
/// alphabetic top-level label, so `joe@smith` is rejected.
fn email_with_domain(value: &str) -> Result<(), ValidationError> {
    let has_tld = value
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(host, tld)| {
            !host.is_empty() && tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
        });
    if has_tld && value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

/// Registration payload. Fields are optional so that a missing field is a
/// validation message rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(
        required(message = "first name is needed"),
        length(min = 1, message = "first name is needed")
    )]
    #[schema(example = "Joe")]
    pub first_name: Option<String>,
    #[validate(
        required(message = "last name is needed"),
        length(min = 1, message = "last name is needed")
    )]
    #[schema(example = "Smith")]
    pub last_name: Option<String>,
    #[validate(
        required(message = "email address is needed"),
        length(min = 1, message = "email address is needed"),
        custom(function = "email_with_domain", message = "email address needs to be valid")
    )]
    #[schema(example = "joe@smith.com")]
    pub email_address: Option<String>,
    #[validate(
        required(message = "password is needed"),
        length(min = 1, message = "password is needed")
    )]
    #[schema(example = "password")]
    pub password: Option<String>,
}

impl FieldOrder for CreateUserDto {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("first_name", "firstName"),
        ("last_name", "lastName"),
        ("email_address", "emailAddress"),
        ("password", "password"),
    ];
}

/// A validated user ready to persist; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String,
}
