//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They validate business rules,
//! check ownership of the records they touch, and wrap multi-table writes in a transaction.
//! Admin actions append to the activity log from inside the same transaction where one is
//! open.

pub mod account;
pub mod activity_log;
pub mod admin;
pub mod game;
pub mod game_category;
pub mod registration;
pub mod team;
pub mod team_member;
pub mod team_staff;
pub mod user_player;
