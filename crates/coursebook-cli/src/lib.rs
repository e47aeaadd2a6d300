//! # Coursebook CLI
//!
//! Administration and seeding utilities used by the `coursebook-cli` binary.
//!
//! Both work through the [`Store`](coursebook_db::Store) trait, so they run
//! the same validation, hashing and uniqueness rules as the API.
//!
//! ```ignore
//! use coursebook_cli::seeder::{SeedConfig, seed_all};
//!
//! let summary = seed_all(&store, SeedConfig::new(10, 3), hash_cost).await?;
//! ```

pub mod accounts;
pub mod seeder;
