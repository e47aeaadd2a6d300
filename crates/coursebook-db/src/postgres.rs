//! PostgreSQL implementation of [`Store`].
//!
//! Queries are built at runtime with `query_as` so the crate compiles without
//! a live database. Unique violations are recognised by constraint name and
//! reported as [`FailureKind::UniqueViolation`](coursebook_core::FailureKind).

use async_trait::async_trait;
use coursebook_core::{StoreError, ValidationFailure};
use coursebook_models::{
    Course, CourseChanges, CourseId, CourseRow, CourseWithOwner, NewCourse, NewUser, PublicUser,
    UserId, UserRecord,
};
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::store::Store;

/// Unique constraint on `users.email_address`.
pub const USERS_EMAIL_ADDRESS_KEY: &str = "users_email_address_key";
/// Unique constraint on `courses.title`.
pub const COURSES_TITLE_KEY: &str = "courses_title_key";

const USER_COLUMNS: &str =
    "id, first_name, last_name, email_address, password_hash, created_at, updated_at";

const COURSE_COLUMNS: &str =
    "id, title, description, estimated_time, materials_needed, user_id";

const COURSE_WITH_OWNER_SELECT: &str = r#"
    SELECT c.id, c.title, c.description, c.estimated_time, c.materials_needed,
           u.id AS owner_id,
           u.first_name AS owner_first_name,
           u.last_name AS owner_last_name,
           u.email_address AS owner_email_address
    FROM courses c
    JOIN users u ON u.id = c.user_id
"#;

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unexpected(err: sqlx::Error, context: &'static str) -> StoreError {
    StoreError::Unexpected(anyhow::Error::new(err).context(context))
}

/// Maps a failed write, turning known unique violations into rejections.
fn map_write_error(err: sqlx::Error, context: &'static str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        match db_err.constraint() {
            Some(USERS_EMAIL_ADDRESS_KEY) => {
                return ValidationFailure::unique("emailAddress", "email already in use").into();
            }
            Some(COURSES_TITLE_KEY) => {
                return ValidationFailure::unique("title", "title already in use").into();
            }
            other => debug!(constraint = ?other, "unmapped unique violation"),
        }
    }
    unexpected(err, context)
}

#[async_trait]
impl Store for PgStore {
    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email_address = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unexpected(e, "failed to look up user by email"))
    }

    #[instrument(skip(self))]
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<PublicUser>, StoreError> {
        sqlx::query_as::<_, PublicUser>(
            "SELECT id, first_name, last_name, email_address FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unexpected(e, "failed to look up user by id"))
    }

    #[instrument(skip(self, user), fields(email = %user.email_address))]
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            r#"INSERT INTO users (first_name, last_name, email_address, password_hash)
               VALUES ($1, $2, $3, $4)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email_address)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "failed to insert user"))
    }

    #[instrument(skip(self))]
    async fn find_course_by_id(
        &self,
        id: CourseId,
    ) -> Result<Option<CourseWithOwner>, StoreError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!("{COURSE_WITH_OWNER_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unexpected(e, "failed to load course"))?;
        Ok(row.map(CourseWithOwner::from))
    }

    #[instrument(skip(self))]
    async fn find_all_courses(&self) -> Result<Vec<CourseWithOwner>, StoreError> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!("{COURSE_WITH_OWNER_SELECT} ORDER BY c.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| unexpected(e, "failed to list courses"))?;
        Ok(rows.into_iter().map(CourseWithOwner::from).collect())
    }

    #[instrument(skip(self, course), fields(owner = %course.user_id))]
    async fn create_course(&self, course: NewCourse) -> Result<Course, StoreError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"INSERT INTO courses (title, description, estimated_time, materials_needed, user_id)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.estimated_time)
        .bind(&course.materials_needed)
        .bind(course.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "failed to insert course"))
    }

    #[instrument(skip(self, changes))]
    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, StoreError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"UPDATE courses
               SET title = $2,
                   description = $3,
                   estimated_time = CASE WHEN $4 THEN $5 ELSE estimated_time END,
                   materials_needed = CASE WHEN $6 THEN $7 ELSE materials_needed END,
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.estimated_time.is_some())
        .bind(changes.estimated_time.flatten())
        .bind(changes.materials_needed.is_some())
        .bind(changes.materials_needed.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "failed to update course"))
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, id: CourseId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| unexpected(e, "failed to delete course"))?;
        if result.rows_affected() == 0 {
            debug!("course already absent");
        }
        Ok(())
    }
}
