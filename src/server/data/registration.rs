//! Registration data repository.
//!
//! Registrations are always returned with their participants, each resolved to the display
//! name of the team member or user player it references. Multi-row writes (`create`,
//! `replace_participants`) expect to run inside the caller's transaction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use entity::registration::RegistrationStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{team_member::TeamMemberRepository, user_player::UserPlayerRepository},
    model::registration::{
        CreateRegistrationParams, Participant, ParticipantParams, ParticipantRef,
        RegistrationFilter, RegistrationWithParticipants,
    },
};

pub struct RegistrationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RegistrationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::registration::Model>, DbErr> {
        entity::prelude::Registration::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn find_with_participants(
        &self,
        id: i32,
    ) -> Result<Option<RegistrationWithParticipants>, DbErr> {
        let Some(registration) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        Ok(self.attach_participants(vec![registration]).await?.pop())
    }

    /// Whether `team_id` already registered for the category of the game.
    pub async fn exists_for_team(
        &self,
        game_id: i32,
        category_id: i32,
        team_id: i32,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::Registration::find()
            .filter(entity::registration::Column::GameId.eq(game_id))
            .filter(entity::registration::Column::CategoryId.eq(category_id))
            .filter(entity::registration::Column::TeamId.eq(team_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Inserts a pending registration and its participants.
    pub async fn create(
        &self,
        params: CreateRegistrationParams,
    ) -> Result<entity::registration::Model, DbErr> {
        let now = Utc::now();
        let registration = entity::registration::ActiveModel {
            game_id: ActiveValue::Set(params.game_id),
            category_id: ActiveValue::Set(params.category_id),
            team_id: ActiveValue::Set(params.team_id),
            registrant_user_id: ActiveValue::Set(params.registrant_user_id),
            status: ActiveValue::Set(RegistrationStatus::Pending),
            note: ActiveValue::Set(params.note),
            submitted_at: ActiveValue::Set(now),
            reviewed_at: ActiveValue::Set(None),
            reviewed_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.insert_participants(registration.id, &params.participants)
            .await?;

        Ok(registration)
    }

    /// Deletes the participants of a registration and inserts `participants` in their place.
    pub async fn replace_participants(
        &self,
        registration_id: i32,
        participants: &[ParticipantParams],
    ) -> Result<(), DbErr> {
        entity::prelude::RegistrationParticipant::delete_many()
            .filter(entity::registration_participant::Column::RegistrationId.eq(registration_id))
            .exec(self.db)
            .await?;

        self.insert_participants(registration_id, participants)
            .await
    }

    async fn insert_participants(
        &self,
        registration_id: i32,
        participants: &[ParticipantParams],
    ) -> Result<(), DbErr> {
        let now = Utc::now();
        for participant in participants {
            let (team_member_id, user_player_id) = match participant.reference {
                ParticipantRef::TeamMember(id) => (Some(id), None),
                ParticipantRef::UserPlayer(id) => (None, Some(id)),
            };
            entity::registration_participant::ActiveModel {
                registration_id: ActiveValue::Set(registration_id),
                team_member_id: ActiveValue::Set(team_member_id),
                user_player_id: ActiveValue::Set(user_player_id),
                is_main_player: ActiveValue::Set(participant.is_main_player),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }
        Ok(())
    }

    /// Records an admin decision.
    pub async fn review(
        &self,
        registration: entity::registration::Model,
        status: RegistrationStatus,
        reviewer_id: i32,
        now: DateTime<Utc>,
    ) -> Result<entity::registration::Model, DbErr> {
        let mut active = registration.into_active_model();
        active.status = ActiveValue::Set(status);
        active.reviewed_at = ActiveValue::Set(Some(now));
        active.reviewed_by = ActiveValue::Set(Some(reviewer_id));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Marks a registration as submitted again: rejected goes back to pending, the
    /// submission time moves to `now` and the review fields are cleared.
    pub async fn resubmit(
        &self,
        registration: entity::registration::Model,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<entity::registration::Model, DbErr> {
        let status = match registration.status {
            RegistrationStatus::Rejected => RegistrationStatus::Pending,
            other => other,
        };

        let mut active = registration.into_active_model();
        active.status = ActiveValue::Set(status);
        active.note = ActiveValue::Set(note);
        active.submitted_at = ActiveValue::Set(now);
        active.reviewed_at = ActiveValue::Set(None);
        active.reviewed_by = ActiveValue::Set(None);
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Registrations matching `filter`, newest first.
    pub async fn list(
        &self,
        filter: RegistrationFilter,
    ) -> Result<Vec<RegistrationWithParticipants>, DbErr> {
        let mut select = entity::prelude::Registration::find();

        if let Some(user_id) = filter.registrant_user_id {
            select = select.filter(entity::registration::Column::RegistrantUserId.eq(user_id));
        }
        if let Some(game_id) = filter.game_id {
            select = select.filter(entity::registration::Column::GameId.eq(game_id));
        }
        if let Some(status) = filter.status {
            select = select.filter(entity::registration::Column::Status.eq(status));
        }

        let registrations = select
            .order_by_desc(entity::registration::Column::CreatedAt)
            .order_by_desc(entity::registration::Column::Id)
            .all(self.db)
            .await?;

        self.attach_participants(registrations).await
    }

    /// Loads participants of `registrations` and resolves their display names.
    async fn attach_participants(
        &self,
        registrations: Vec<entity::registration::Model>,
    ) -> Result<Vec<RegistrationWithParticipants>, DbErr> {
        if registrations.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = registrations.iter().map(|r| r.id).collect();
        let rows = entity::prelude::RegistrationParticipant::find()
            .filter(entity::registration_participant::Column::RegistrationId.is_in(ids))
            .order_by_asc(entity::registration_participant::Column::Id)
            .all(self.db)
            .await?;

        let member_ids: Vec<i32> = rows.iter().filter_map(|p| p.team_member_id).collect();
        let player_ids: Vec<i32> = rows.iter().filter_map(|p| p.user_player_id).collect();

        let member_names: HashMap<i32, String> = TeamMemberRepository::new(self.db)
            .find_by_ids(&member_ids)
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();
        let player_names: HashMap<i32, String> = UserPlayerRepository::new(self.db)
            .find_by_ids(&player_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let mut by_registration: HashMap<i32, Vec<Participant>> = HashMap::new();
        for row in rows {
            let name = row
                .team_member_id
                .and_then(|id| member_names.get(&id))
                .or_else(|| row.user_player_id.and_then(|id| player_names.get(&id)))
                .cloned()
                .unwrap_or_default();

            by_registration
                .entry(row.registration_id)
                .or_default()
                .push(Participant {
                    id: row.id,
                    team_member_id: row.team_member_id,
                    user_player_id: row.user_player_id,
                    name,
                    is_main_player: row.is_main_player,
                });
        }

        Ok(registrations
            .into_iter()
            .map(|registration| RegistrationWithParticipants {
                participants: by_registration.remove(&registration.id).unwrap_or_default(),
                registration,
            })
            .collect())
    }
}

#[cfg(test)]
mod test;
