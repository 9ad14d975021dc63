//! HTTP request handlers.
//!
//! One module per resource. Handlers authenticate through `AuthGuard`, convert the request
//! DTO into server params, call a single service operation and map the result to a DTO.
//! Each handler carries a `#[utoipa::path]` annotation consumed by the router.

pub mod activity_log;
pub mod admin;
pub mod auth;
pub mod game;
pub mod game_category;
pub mod registration;
pub mod team;
pub mod team_member;
pub mod team_staff;
pub mod user;
pub mod user_player;
