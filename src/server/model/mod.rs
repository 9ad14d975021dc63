//! Server-side domain models and parameter types.
//!
//! Parameter types are built from request DTOs with `from_dto`, which is where field
//! validation happens. Domain models are converted from entity models at the repository
//! boundary and transformed to DTOs at the controller boundary with `into_dto`.

pub mod activity_log;
pub mod game;
pub mod registration;
pub mod team;
pub mod user;
pub mod user_player;

/// Largest offset the database driver accepts; SQLite binds offsets as `i64`.
pub const MAX_OFFSET: u64 = i64::MAX as u64;
