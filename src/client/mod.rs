//! Typed HTTP client for the signupboard API.
//!
//! `api::ApiClient` wraps every endpoint and keeps the session cookie between calls.
//! `state` layers watchable query holders over it so a front end can observe
//! `loading` / `error` / `data` and refresh after mutations.

pub mod api;
pub mod model;
pub mod state;

pub use api::ApiClient;
pub use model::error::ApiError;
