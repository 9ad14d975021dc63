//! Database repository layer for all domain entities.
//!
//! Each repository wraps a borrowed connection that is either the pool or an open transaction,
//! so services can compose several repositories inside one transaction. Repositories take
//! validated parameter models from `server::model` and return SeaORM entity models or the
//! aggregates built from them.

pub mod activity_log;
pub mod game;
pub mod game_category;
pub mod game_detail;
pub mod game_fee;
pub mod password_reset_token;
pub mod registration;
pub mod team;
pub mod team_member;
pub mod team_staff;
pub mod user;
pub mod user_player;
