//! Factory methods for creating test data.
//!
//! Each entity has a `*Factory` builder for customization and a `create_*` shorthand that
//! inserts a row with defaults. Foreign keys are passed explicitly so tests stay readable
//! about ownership.
//!
//! ```rust,ignore
//! let owner = factory::user::UserFactory::new(&db).admin().build().await?;
//! let team = factory::create_team(&db, owner.id).await?;
//! let member = factory::team_member::TeamMemberFactory::new(&db, team.id)
//!     .banned(true)
//!     .build()
//!     .await?;
//! ```

pub mod game;
pub mod helpers;
pub mod registration;
pub mod team;
pub mod team_member;
pub mod team_staff;
pub mod user;
pub mod user_player;

pub use game::{create_category, create_game, create_open_game};
pub use registration::create_registration;
pub use team::create_team;
pub use team_member::create_team_member;
pub use team_staff::create_team_staff;
pub use user::create_user;
pub use user_player::create_user_player;
