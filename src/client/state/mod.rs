//! Observable state over the API client.
//!
//! `Query<T>` holds the last result of one request behind three `watch` channels. The
//! composables own one query per resource, run the matching request and refresh the list
//! after every mutation that changes it.

mod admin;
mod game;
mod query;
mod registration;
mod session;
mod team;
mod user_player;

pub use admin::{ActivityLogState, DashboardStatsState, UserManagementState};
pub use game::GamesState;
pub use query::Query;
pub use registration::RegistrationsState;
pub use session::SessionState;
pub use team::TeamsState;
pub use user_player::UserPlayersState;
