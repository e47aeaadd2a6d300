//! # Coursebook API
//!
//! A REST API built with Rust, Axum, and PostgreSQL for registering users and
//! publishing the courses they own.
//!
//! ## Overview
//!
//! - **Users**: public registration; `GET /api/users` returns the
//!   authenticated caller
//! - **Courses**: anyone can browse; creating requires authentication, and
//!   only the owner may edit or delete a course
//! - **Authentication**: HTTP Basic, checked against bcrypt password hashes
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Basic-auth extractor and ownership check
//! ├── modules/          # Feature modules
//! │   ├── users/       # Registration and current user
//! │   └── courses/     # Course catalogue
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing setup and request logging
//! ├── metrics.rs        # Prometheus metrics
//! ├── router.rs         # Route tree and layers
//! ├── state.rs          # Shared application state
//! └── validator.rs      # JSON body extractors
//! crates/
//! ├── coursebook-core/    # AppError taxonomy, password hashing
//! ├── coursebook-config/  # Environment configuration
//! ├── coursebook-db/      # Store trait, PostgreSQL and in-memory stores
//! ├── coursebook-models/  # Domain models and DTOs
//! └── coursebook-cli/     # Administration CLI
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers with OpenAPI annotations
//! - `service.rs`: business logic against the [`Store`](coursebook_db::Store)
//! - `model.rs`: the DTOs and constants the feature uses
//! - `router.rs`: route definitions
//!
//! ## Error Handling
//!
//! Handlers return [`AppError`](coursebook_core::AppError), which renders:
//!
//! - 401 `{"message": "Access denied."}` for every authentication failure
//! - 400 `{"errors": [...]}` for field validation, in field order
//! - 400 `{"message", "field"}` for uniqueness violations
//! - 403/404 `{"message": ...}`
//! - 500 `{"message": "An unexpected error occurred"}` for everything else,
//!   including panics

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use router::init_router;
pub use state::{AppState, init_app_state};
