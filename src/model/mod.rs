//! Data transfer objects shared by the server and the client.
//!
//! Everything here serializes as camelCase JSON. Schemas are derived for the OpenAPI document
//! when the `server` feature is enabled.

pub mod activity_log;
pub mod api;
pub mod game;
pub mod region;
pub mod registration;
pub mod team;
pub mod user;
pub mod user_player;
