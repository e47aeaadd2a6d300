use anyhow::anyhow;
use coursebook_core::{AppError, password::hash_password_with_cost};
use coursebook_db::Store;
use coursebook_models::{UserId, validate_ordered};
use tracing::{info, instrument};

use crate::metrics::track_user_created;
use crate::modules::users::model::{CreateUserDto, NewUser, PublicUser};

pub struct UserService;

impl UserService {
    /// Registration pipeline: validate, hash the password, persist.
    #[instrument(skip(store, dto), fields(email = ?dto.email_address))]
    pub async fn register(
        store: &dyn Store,
        hash_cost: u32,
        dto: CreateUserDto,
    ) -> Result<PublicUser, AppError> {
        validate_ordered(&dto)?;

        let CreateUserDto {
            first_name: Some(first_name),
            last_name: Some(last_name),
            email_address: Some(email_address),
            password: Some(password),
        } = dto
        else {
            return Err(AppError::internal(anyhow!(
                "validated registration is missing a field"
            )));
        };

        let password_hash = hash_password_with_cost(&password, hash_cost)?;

        let record = store
            .create_user(NewUser {
                first_name,
                last_name,
                email_address,
                password_hash,
            })
            .await?;

        info!(user_id = %record.id, "user registered");
        track_user_created();
        Ok(record.into())
    }

    /// Reloads the caller's public fields.
    #[instrument(skip(store))]
    pub async fn current_user(store: &dyn Store, id: UserId) -> Result<PublicUser, AppError> {
        store
            .find_user_by_id(id)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
