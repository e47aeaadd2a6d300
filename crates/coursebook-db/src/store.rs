use async_trait::async_trait;
use coursebook_core::StoreError;
use coursebook_models::{
    Course, CourseChanges, CourseId, CourseWithOwner, NewCourse, NewUser, PublicUser, UserId,
    UserRecord,
};

/// Persistence operations used by the API.
///
/// Writes report constraint failures as [`StoreError::Rejected`]; anything
/// else is [`StoreError::Unexpected`].
#[async_trait]
pub trait Store: Send + Sync {
    /// Exact-match lookup by login identifier.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<PublicUser>, StoreError>;

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    async fn find_course_by_id(&self, id: CourseId)
    -> Result<Option<CourseWithOwner>, StoreError>;

    /// All courses with their owners, ordered by id.
    async fn find_all_courses(&self) -> Result<Vec<CourseWithOwner>, StoreError>;

    async fn create_course(&self, course: NewCourse) -> Result<Course, StoreError>;

    /// Returns `None` when the course no longer exists.
    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, StoreError>;

    /// Deleting a missing course is not an error.
    async fn delete_course(&self, id: CourseId) -> Result<(), StoreError>;
}
