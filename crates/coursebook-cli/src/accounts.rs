use anyhow::{Context, anyhow, bail};
use coursebook_core::{AppError, password::hash_password_with_cost};
use coursebook_db::Store;
use coursebook_models::{CreateUserDto, NewUser, PublicUser, validate_ordered};

/// Creates a user the same way registration does: validate, hash, persist.
pub async fn create_user(
    store: &dyn Store,
    hash_cost: u32,
    dto: CreateUserDto,
) -> anyhow::Result<PublicUser> {
    if let Err(failure) = validate_ordered(&dto) {
        bail!(failure.messages().join(", "));
    }

    let (Some(first_name), Some(last_name), Some(email_address), Some(password)) =
        (dto.first_name, dto.last_name, dto.email_address, dto.password)
    else {
        return Err(anyhow!("validated user is missing a field"));
    };

    let password_hash = hash_password_with_cost(&password, hash_cost).map_err(describe)?;

    let record = store
        .create_user(NewUser {
            first_name,
            last_name,
            email_address,
            password_hash,
        })
        .await
        .map_err(|e| describe(e.into()))
        .context("failed to create user")?;

    Ok(record.into())
}

fn describe(err: AppError) -> anyhow::Error {
    match err {
        AppError::Validation(failure) => anyhow!(failure.messages().join(", ")),
        AppError::Internal(err) => err,
        other => anyhow!(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebook_db::MemoryStore;

    fn dto(email: &str) -> CreateUserDto {
        CreateUserDto {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email_address: Some(email.into()),
            password: Some("password".into()),
        }
    }

    #[tokio::test]
    async fn creates_user_with_hashed_password() {
        let store = MemoryStore::new();
        let user = create_user(&store, 4, dto("ada@example.com")).await.unwrap();
        assert_eq!(user.email_address, "ada@example.com");

        let record = store
            .find_user_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(record.password_hash, "password");
    }

    #[tokio::test]
    async fn reports_validation_messages() {
        let store = MemoryStore::new();
        let err = create_user(&store, 4, dto("not-an-email")).await.unwrap_err();
        assert_eq!(err.to_string(), "email address needs to be valid");
    }

    #[tokio::test]
    async fn reports_duplicate_email() {
        let store = MemoryStore::new();
        create_user(&store, 4, dto("ada@example.com")).await.unwrap();
        let err = create_user(&store, 4, dto("ada@example.com")).await.unwrap_err();
        assert!(format!("{err:#}").contains("email already in use"));
    }
}
