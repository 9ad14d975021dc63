//! Signupboard Test Utils
//!
//! Shared testing utilities for the signupboard crates. Provides a builder for test contexts
//! backed by in-memory SQLite databases, an optional session backed by the same database, and
//! factories for every entity.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn creates_team() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_team_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let user = factory::create_user(db).await?;
//!     let team = factory::create_team(db, user.id).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
