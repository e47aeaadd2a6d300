use anyhow::anyhow;
use coursebook_core::AppError;
use coursebook_db::Store;
use coursebook_models::UserId;
use tracing::{info, instrument};

use crate::metrics::{track_course_created, track_course_deleted};
use crate::middleware::ownership::{CourseAction, authorize};
use crate::modules::courses::model::{
    Course, CourseId, CourseWithOwner, CreateCourseDto, INDICATED_NOT_FOUND, NO_COURSES, NewCourse,
    REQUESTED_NOT_FOUND, TITLE_AND_DESCRIPTION_NEEDED, UpdateCourseDto,
};

pub struct CourseService;

impl CourseService {
    #[instrument(skip(store))]
    pub async fn list(store: &dyn Store) -> Result<Vec<CourseWithOwner>, AppError> {
        let courses = store.find_all_courses().await?;
        if courses.is_empty() {
            return Err(AppError::not_found(NO_COURSES));
        }
        Ok(courses)
    }

    #[instrument(skip(store))]
    pub async fn get(store: &dyn Store, id: CourseId) -> Result<CourseWithOwner, AppError> {
        store
            .find_course_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(REQUESTED_NOT_FOUND))
    }

    /// Creates a course owned by `owner`; `dto` must already be validated.
    #[instrument(skip(store, dto))]
    pub async fn create(
        store: &dyn Store,
        owner: UserId,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let CreateCourseDto {
            title: Some(title),
            description: Some(description),
            estimated_time,
            materials_needed,
        } = dto
        else {
            return Err(AppError::internal(anyhow!(
                "validated course is missing a field"
            )));
        };

        let course = store
            .create_course(NewCourse {
                title,
                description,
                estimated_time,
                materials_needed,
                user_id: owner,
            })
            .await?;

        info!(course_id = %course.id, %owner, "course created");
        track_course_created();
        Ok(course)
    }

    /// Load, check ownership, check required fields, then write. A missing
    /// or unreadable payload fails the required-fields check.
    #[instrument(skip(store, dto))]
    pub async fn update(
        store: &dyn Store,
        caller: UserId,
        id: CourseId,
        dto: Option<UpdateCourseDto>,
    ) -> Result<(), AppError> {
        let existing = store
            .find_course_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(INDICATED_NOT_FOUND))?;

        authorize(caller, existing.owner_id(), CourseAction::Edit)?;

        let changes = dto
            .and_then(UpdateCourseDto::into_changes)
            .ok_or_else(|| AppError::bad_request(TITLE_AND_DESCRIPTION_NEEDED))?;

        store
            .update_course(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(INDICATED_NOT_FOUND))?;

        info!(course_id = %id, "course updated");
        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn delete(store: &dyn Store, caller: UserId, id: CourseId) -> Result<(), AppError> {
        let existing = store
            .find_course_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(INDICATED_NOT_FOUND))?;

        authorize(caller, existing.owner_id(), CourseAction::Delete)?;

        store.delete_course(id).await?;

        info!(course_id = %id, "course deleted");
        track_course_deleted();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebook_db::MemoryStore;
    use coursebook_models::NewUser;

    async fn seed_owner(store: &MemoryStore, email: &str) -> UserId {
        store
            .create_user(NewUser {
                first_name: "Joe".into(),
                last_name: "Smith".into(),
                email_address: email.into(),
                password_hash: "unused".into(),
            })
            .await
            .unwrap()
            .id
    }

    fn create_dto(title: &str) -> CreateCourseDto {
        CreateCourseDto {
            title: Some(title.into()),
            description: Some("D".into()),
            estimated_time: None,
            materials_needed: None,
        }
    }

    #[tokio::test]
    async fn empty_catalogue_is_not_found() {
        let store = MemoryStore::new();
        let err = CourseService::list(&store).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == NO_COURSES));
    }

    #[tokio::test]
    async fn non_owner_cannot_update_and_course_is_unchanged() {
        let store = MemoryStore::new();
        let owner = seed_owner(&store, "owner@example.com").await;
        let other = seed_owner(&store, "other@example.com").await;
        let course = CourseService::create(&store, owner, create_dto("T"))
            .await
            .unwrap();

        let err = CourseService::update(
            &store,
            other,
            course.id,
            Some(UpdateCourseDto {
                title: Some("Hijacked".into()),
                description: Some("D".into()),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let stored = CourseService::get(&store, course.id).await.unwrap();
        assert_eq!(stored.title, "T");
    }

    #[tokio::test]
    async fn ownership_is_checked_before_required_fields() {
        let store = MemoryStore::new();
        let owner = seed_owner(&store, "owner@example.com").await;
        let other = seed_owner(&store, "other@example.com").await;
        let course = CourseService::create(&store, owner, create_dto("T"))
            .await
            .unwrap();

        let err = CourseService::update(&store, other, course.id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = CourseService::update(&store, owner, course.id, Some(UpdateCourseDto::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == TITLE_AND_DESCRIPTION_NEEDED));

        let err = CourseService::update(&store, owner, course.id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == TITLE_AND_DESCRIPTION_NEEDED));
    }

    #[tokio::test]
    async fn missing_course_is_reported_before_payload() {
        let store = MemoryStore::new();
        let caller = seed_owner(&store, "owner@example.com").await;

        let err = CourseService::update(&store, caller, CourseId::new(99), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == INDICATED_NOT_FOUND));
    }

    #[tokio::test]
    async fn non_owner_cannot_delete() {
        let store = MemoryStore::new();
        let owner = seed_owner(&store, "owner@example.com").await;
        let other = seed_owner(&store, "other@example.com").await;
        let course = CourseService::create(&store, owner, create_dto("T"))
            .await
            .unwrap();

        let err = CourseService::delete(&store, other, course.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(m) if m == "you can delete only your courses"));
        assert_eq!(store.course_count().await, 1);
    }
}
