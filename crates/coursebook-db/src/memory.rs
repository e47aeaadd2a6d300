//! In-process [`Store`] for tests.
//!
//! Enforces the same unique constraints as the PostgreSQL schema and hands
//! out sequential ids starting at 1.

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use coursebook_core::{StoreError, ValidationFailure};
use coursebook_models::{
    Course, CourseChanges, CourseId, CourseWithOwner, NewCourse, NewUser, PublicUser, UserId,
    UserRecord,
};
use tokio::sync::RwLock;

use crate::store::Store;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRecord>,
    courses: Vec<Course>,
    last_user_id: i64,
    last_course_id: i64,
}

impl Tables {
    fn owner_of(&self, course: &Course) -> Result<PublicUser, StoreError> {
        self.users
            .iter()
            .find(|u| u.id == course.user_id)
            .map(UserRecord::to_public)
            .ok_or_else(|| {
                StoreError::Unexpected(anyhow!(
                    "course {} references missing user {}",
                    course.id,
                    course.user_id
                ))
            })
    }

    fn with_owner(&self, course: &Course) -> Result<CourseWithOwner, StoreError> {
        Ok(CourseWithOwner::from_parts(
            course.clone(),
            self.owner_of(course)?,
        ))
    }

    fn title_taken(&self, title: &str, except: Option<CourseId>) -> bool {
        self.courses
            .iter()
            .any(|c| c.title == title && Some(c.id) != except)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn course_count(&self) -> usize {
        self.tables.read().await.courses.len()
    }
}

fn title_in_use() -> StoreError {
    ValidationFailure::unique("title", "title already in use").into()
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email_address == email)
            .cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<PublicUser>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id)
            .map(UserRecord::to_public))
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.email_address == user.email_address)
        {
            return Err(
                ValidationFailure::unique("emailAddress", "email already in use").into(),
            );
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let record = UserRecord {
            id: UserId::new(tables.last_user_id),
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(record.clone());
        Ok(record)
    }

    async fn find_course_by_id(
        &self,
        id: CourseId,
    ) -> Result<Option<CourseWithOwner>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .courses
            .iter()
            .find(|c| c.id == id)
            .map(|c| tables.with_owner(c))
            .transpose()
    }

    async fn find_all_courses(&self) -> Result<Vec<CourseWithOwner>, StoreError> {
        let tables = self.tables.read().await;
        let mut courses = tables
            .courses
            .iter()
            .map(|c| tables.with_owner(c))
            .collect::<Result<Vec<_>, _>>()?;
        courses.sort_by_key(|c| c.id);
        Ok(courses)
    }

    async fn create_course(&self, course: NewCourse) -> Result<Course, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == course.user_id) {
            return Err(StoreError::Unexpected(anyhow!(
                "foreign key violation: user {} does not exist",
                course.user_id
            )));
        }
        if tables.title_taken(&course.title, None) {
            return Err(title_in_use());
        }

        tables.last_course_id += 1;
        let created = Course {
            id: CourseId::new(tables.last_course_id),
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            user_id: course.user_id,
        };
        tables.courses.push(created.clone());
        Ok(created)
    }

    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.title_taken(&changes.title, Some(id)) {
            return Err(title_in_use());
        }
        let Some(course) = tables.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        course.title = changes.title;
        course.description = changes.description;
        if let Some(estimated_time) = changes.estimated_time {
            course.estimated_time = estimated_time;
        }
        if let Some(materials_needed) = changes.materials_needed {
            course.materials_needed = materials_needed;
        }
        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), StoreError> {
        self.tables.write().await.courses.retain(|c| c.id != id);
        Ok(())
    }
}
