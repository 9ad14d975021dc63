//! Registration factory.

use chrono::Utc;
use entity::registration::RegistrationStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for registrations with an explicit status.
pub struct RegistrationFactory<'a> {
    db: &'a DatabaseConnection,
    game_id: i32,
    category_id: i32,
    registrant_user_id: i32,
    team_id: Option<i32>,
    status: RegistrationStatus,
    note: Option<String>,
}

impl<'a> RegistrationFactory<'a> {
    /// Defaults to a pending registration without a team.
    pub fn new(
        db: &'a DatabaseConnection,
        game_id: i32,
        category_id: i32,
        registrant_user_id: i32,
    ) -> Self {
        Self {
            db,
            game_id,
            category_id,
            registrant_user_id,
            team_id: None,
            status: RegistrationStatus::Pending,
            note: None,
        }
    }

    pub fn team(mut self, team_id: i32) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn status(mut self, status: RegistrationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    pub async fn build(self) -> Result<entity::registration::Model, DbErr> {
        let now = Utc::now();
        let reviewed = !matches!(self.status, RegistrationStatus::Pending);
        entity::registration::ActiveModel {
            game_id: ActiveValue::Set(self.game_id),
            category_id: ActiveValue::Set(self.category_id),
            team_id: ActiveValue::Set(self.team_id),
            registrant_user_id: ActiveValue::Set(self.registrant_user_id),
            status: ActiveValue::Set(self.status),
            note: ActiveValue::Set(self.note),
            submitted_at: ActiveValue::Set(now),
            reviewed_at: ActiveValue::Set(reviewed.then_some(now)),
            reviewed_by: ActiveValue::Set(reviewed.then_some(self.registrant_user_id)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending registration without a team.
pub async fn create_registration(
    db: &DatabaseConnection,
    game_id: i32,
    category_id: i32,
    registrant_user_id: i32,
) -> Result<entity::registration::Model, DbErr> {
    RegistrationFactory::new(db, game_id, category_id, registrant_user_id)
        .build()
        .await
}

/// Attaches a user player to a registration.
pub async fn add_player_participant(
    db: &DatabaseConnection,
    registration_id: i32,
    user_player_id: i32,
    is_main_player: bool,
) -> Result<entity::registration_participant::Model, DbErr> {
    entity::registration_participant::ActiveModel {
        registration_id: ActiveValue::Set(registration_id),
        team_member_id: ActiveValue::Set(None),
        user_player_id: ActiveValue::Set(Some(user_player_id)),
        is_main_player: ActiveValue::Set(is_main_player),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
