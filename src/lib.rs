//! Signupboard
//!
//! Registration backend for sports events: organisers publish games with categories and
//! fees, users manage their teams and players and sign them up, and admins review the
//! sign-ups.
//!
//! - `model` - JSON DTOs shared by both sides
//! - `server` - Axum API (feature `server`)
//! - `client` - Typed HTTP client and query state (feature `client`)

pub mod model;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "client")]
pub mod client;
