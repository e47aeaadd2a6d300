//! Fake data seeding.
//!
//! Users get the password [`SEED_PASSWORD`] and unique `@example.com`
//! addresses; course titles carry a numeric suffix to stay unique.

mod courses;
mod users;

pub use courses::generate_courses;
pub use users::generate_users;

use anyhow::anyhow;
use coursebook_core::{StoreError, password::hash_password_with_cost};
use coursebook_db::Store;
use std::time::Instant;

pub const SEED_PASSWORD: &str = "password";

#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub users: usize,
    pub courses_per_user: usize,
}

impl SeedConfig {
    pub fn new(users: usize, courses_per_user: usize) -> Self {
        Self {
            users,
            courses_per_user,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users_created: usize,
    pub courses_created: usize,
    /// Rows skipped because of a uniqueness collision with existing data.
    pub skipped: usize,
}

fn into_anyhow(err: StoreError) -> anyhow::Error {
    match err {
        StoreError::Rejected(failure) => anyhow!(failure.messages().join(", ")),
        StoreError::Unexpected(err) => err,
    }
}

pub async fn seed_all(
    store: &dyn Store,
    config: SeedConfig,
    hash_cost: u32,
) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    let mut summary = SeedSummary::default();

    println!("👥 Seeding {} users...", config.users);
    let password_hash = hash_password_with_cost(SEED_PASSWORD, hash_cost)
        .map_err(|e| anyhow!("failed to hash seed password: {e}"))?;

    let mut owner_ids = Vec::with_capacity(config.users);
    for user in generate_users(config.users, &password_hash) {
        match store.create_user(user).await {
            Ok(record) => {
                owner_ids.push(record.id);
                summary.users_created += 1;
            }
            Err(StoreError::Rejected(_)) => summary.skipped += 1,
            Err(e) => return Err(into_anyhow(e)),
        }
    }

    println!(
        "📚 Seeding {} courses per user...",
        config.courses_per_user
    );
    for course in generate_courses(&owner_ids, config.courses_per_user) {
        match store.create_course(course).await {
            Ok(_) => summary.courses_created += 1,
            Err(StoreError::Rejected(_)) => summary.skipped += 1,
            Err(e) => return Err(into_anyhow(e)),
        }
    }

    println!(
        "   ✓ {} users, {} courses ({} skipped) in {:?}",
        summary.users_created,
        summary.courses_created,
        summary.skipped,
        start_time.elapsed()
    );
    Ok(summary)
}
