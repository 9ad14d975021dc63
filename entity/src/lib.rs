//! SeaORM entities for the signupboard schema.
//!
//! Each module mirrors one table created by the `migration` crate. Relations declare the
//! foreign keys so `Schema::create_table_from_entity` produces the same constraints in tests.

pub mod prelude;

pub mod activity_log;
pub mod game;
pub mod game_category;
pub mod game_detail;
pub mod game_fee;
pub mod password_reset_token;
pub mod registration;
pub mod registration_participant;
pub mod team;
pub mod team_member;
pub mod team_staff;
pub mod user;
pub mod user_player;
