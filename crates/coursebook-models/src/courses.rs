//! Course domain models and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, UserId};
use crate::users::PublicUser;
use crate::validation::FieldOrder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: UserId,
}

/// Flat row produced by joining `courses` with `users`.
#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub owner_id: UserId,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email_address: String,
}

/// A course as returned by the API, with its owner's public fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithOwner {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub owner: PublicUser,
}

impl From<CourseRow> for CourseWithOwner {
    fn from(row: CourseRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            estimated_time: row.estimated_time,
            materials_needed: row.materials_needed,
            owner: PublicUser {
                id: row.owner_id,
                first_name: row.owner_first_name,
                last_name: row.owner_last_name,
                email_address: row.owner_email_address,
            },
        }
    }
}

impl CourseWithOwner {
    pub fn from_parts(course: Course, owner: PublicUser) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            owner,
        }
    }

    pub fn owner_id(&self) -> UserId {
        self.owner.id
    }
}

/// Course creation payload. Any owner field sent by the client is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseDto {
    #[validate(
        required(message = "title is needed"),
        length(min = 1, message = "title is needed")
    )]
    #[schema(example = "Build a Basic Bookcase")]
    pub title: Option<String>,
    #[validate(
        required(message = "description is needed"),
        length(min = 1, message = "description is needed")
    )]
    pub description: Option<String>,
    #[schema(example = "12 hours")]
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl FieldOrder for CreateCourseDto {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("title", "title"),
        ("description", "description"),
        ("estimated_time", "estimatedTime"),
        ("materials_needed", "materialsNeeded"),
    ];
}

/// Reads a present field, `null` included, as `Some`, leaving `None` for a
/// field the client did not send.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Course update payload. Title and description must both be present.
/// An absent optional field keeps its stored value; `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseDto {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub estimated_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub materials_needed: Option<Option<String>>,
}

impl UpdateCourseDto {
    /// Converts into changes when both title and description are non-empty.
    pub fn into_changes(self) -> Option<CourseChanges> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let description = self.description.filter(|d| !d.is_empty())?;
        Some(CourseChanges {
            title,
            description,
            estimated_time: self.estimated_time,
            materials_needed: self.materials_needed,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: UserId,
}

/// Changes applied by an update. For the optional columns `None` leaves the
/// stored value untouched and `Some(None)` clears it.
#[derive(Debug, Clone)]
pub struct CourseChanges {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<Option<String>>,
    pub materials_needed: Option<Option<String>>,
}
