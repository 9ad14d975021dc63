//! User player factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, NaiveDate, Utc};
use entity::user_player::Gender;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating roster players owned directly by a user.
pub struct UserPlayerFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    name: String,
    gender: Gender,
    is_banned: bool,
    ban_until: Option<DateTime<Utc>>,
}

impl<'a> UserPlayerFactory<'a> {
    /// Defaults: name `"Player {id}"`, female, not banned, born 1999-05-20.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            name: format!("Player {}", next_id()),
            gender: Gender::Female,
            is_banned: false,
            ban_until: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Bans the player, optionally until `until`.
    pub fn banned(mut self, until: Option<DateTime<Utc>>) -> Self {
        self.is_banned = true;
        self.ban_until = until;
        self
    }

    pub async fn build(self) -> Result<entity::user_player::Model, DbErr> {
        let now = Utc::now();
        entity::user_player::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            name: ActiveValue::Set(self.name),
            gender: ActiveValue::Set(self.gender),
            birthday: ActiveValue::Set(NaiveDate::from_ymd_opt(1999, 5, 20).unwrap_or_default()),
            is_banned: ActiveValue::Set(self.is_banned),
            ban_reason: ActiveValue::Set(self.is_banned.then(|| "Test ban".to_string())),
            ban_until: ActiveValue::Set(self.ban_until),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unbanned player owned by `user_id`.
pub async fn create_user_player(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::user_player::Model, DbErr> {
    UserPlayerFactory::new(db, user_id).build().await
}
