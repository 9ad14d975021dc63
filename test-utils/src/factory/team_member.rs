//! Team member factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, NaiveDate, Utc};
use entity::user_player::Gender;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating members of a team.
pub struct TeamMemberFactory<'a> {
    db: &'a DatabaseConnection,
    team_id: i32,
    name: String,
    gender: Gender,
    is_banned: bool,
    ban_until: Option<DateTime<Utc>>,
}

impl<'a> TeamMemberFactory<'a> {
    /// Defaults: name `"Member {id}"`, male, not banned, born 2000-01-01.
    pub fn new(db: &'a DatabaseConnection, team_id: i32) -> Self {
        Self {
            db,
            team_id,
            name: format!("Member {}", next_id()),
            gender: Gender::Male,
            is_banned: false,
            ban_until: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn banned(mut self, banned: bool) -> Self {
        self.is_banned = banned;
        self
    }

    /// Bans the member until `until`.
    pub fn banned_until(mut self, until: DateTime<Utc>) -> Self {
        self.is_banned = true;
        self.ban_until = Some(until);
        self
    }

    pub async fn build(self) -> Result<entity::team_member::Model, DbErr> {
        let now = Utc::now();
        entity::team_member::ActiveModel {
            team_id: ActiveValue::Set(self.team_id),
            name: ActiveValue::Set(self.name),
            role: ActiveValue::Set("選手".to_string()),
            gender: ActiveValue::Set(self.gender),
            birthday: ActiveValue::Set(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()),
            phone: ActiveValue::Set(None),
            email: ActiveValue::Set(None),
            line_id: ActiveValue::Set(None),
            is_banned: ActiveValue::Set(self.is_banned),
            ban_reason: ActiveValue::Set(None),
            ban_until: ActiveValue::Set(self.ban_until),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a member of `team_id` with default values.
pub async fn create_team_member(
    db: &DatabaseConnection,
    team_id: i32,
) -> Result<entity::team_member::Model, DbErr> {
    TeamMemberFactory::new(db, team_id).build().await
}
