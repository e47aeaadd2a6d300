use bcrypt::{hash, verify};

use crate::errors::AppError;

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal(anyhow::anyhow!("failed to hash password: {e}")))
}

/// Checks `password` against a stored bcrypt hash.
///
/// A hash that cannot be parsed is an error, not a mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("failed to verify password: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_HASH_COST: u32 = 4;

    #[test]
    fn hash_is_not_plaintext_and_verifies() {
        let hashed = hash_password_with_cost("s3cret", TEST_HASH_COST).unwrap();
        assert_ne!(hashed, "s3cret");
        assert!(verify_password("s3cret", &hashed).unwrap());
        assert!(!verify_password("other", &hashed).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password_with_cost("s3cret", TEST_HASH_COST).unwrap();
        let b = hash_password_with_cost("s3cret", TEST_HASH_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn corrupt_hash_is_an_error() {
        assert!(matches!(
            verify_password("s3cret", "not-a-bcrypt-hash"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn out_of_range_cost_is_an_error() {
        assert!(hash_password_with_cost("s3cret", 3).is_err());
    }
}
