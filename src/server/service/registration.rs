//! Registration lifecycle: signup, admin review, resubmission and listings.
//!
//! A registration starts `pending`. Admins move it to `approved` or `rejected`; a rejected
//! registration goes back to `pending` when its registrant resubmits. Approved and confirmed
//! registrations are locked for the registrant.

use chrono::{DateTime, Utc};
use entity::registration::RegistrationStatus;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::server::{
    data::{
        game::GameRepository, game_category::GameCategoryRepository,
        registration::RegistrationRepository, team_member::TeamMemberRepository,
        user_player::UserPlayerRepository,
    },
    error::{internal::InternalError, AppError},
    middleware::auth::Permission,
    model::{
        activity_log::{ClientInfo, CreateActivityLogParams},
        registration::{
            CreateRegistrationParams, ParticipantParams, RegistrationFilter,
            RegistrationWithParticipants, ResubmitParams, ReviewDecision, SignupParams,
        },
    },
    service::{activity_log::record_on, team::require_owned_team},
};

const NOT_FOUND: &str = "找不到此報名記錄";

pub struct RegistrationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RegistrationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers participants for one category of a game.
    ///
    /// Checks run in this order: game, category, signup window, team ownership, duplicate
    /// team entry, participant references, participant eligibility. The registration and
    /// its participants are written in one transaction.
    ///
    /// # Returns
    /// - `Ok(registration)` - Pending registration with its participants
    /// - `Err(AppError::NotFound)` - Game, category or team missing
    /// - `Err(AppError::Forbidden)` - Team owned by another user
    /// - `Err(AppError::BadRequest)` - Window closed, duplicate entry or invalid participants
    pub async fn signup(
        &self,
        actor: &entity::user::Model,
        params: SignupParams,
        now: DateTime<Utc>,
    ) -> Result<RegistrationWithParticipants, AppError> {
        let txn = self.db.begin().await?;

        let Some(game) = GameRepository::new(&txn).find_by_id(params.game_id).await? else {
            return Err(AppError::NotFound("找不到此比賽".to_string()));
        };

        let category = GameCategoryRepository::new(&txn)
            .find_by_id(params.category_id)
            .await?
            .filter(|category| category.game_id == game.id)
            .ok_or_else(|| AppError::NotFound("找不到此比賽類別".to_string()))?;

        if now < game.signup_start {
            return Err(AppError::BadRequest("報名尚未開始".to_string()));
        }
        if now > game.signup_end {
            return Err(AppError::BadRequest("報名已截止".to_string()));
        }

        let registrations = RegistrationRepository::new(&txn);

        if let Some(team_id) = params.team_id {
            require_owned_team(&txn, actor, team_id, "沒有權限操作此隊伍").await?;

            if registrations
                .exists_for_team(game.id, category.id, team_id)
                .await?
            {
                return Err(AppError::BadRequest("此隊伍已經報名此類別".to_string()));
            }
        }

        let participants = ParticipantParams::from_dtos(params.participants)?;
        check_eligibility(&txn, &participants, actor.id, params.team_id, now).await?;

        let registration = registrations
            .create(CreateRegistrationParams {
                game_id: game.id,
                category_id: category.id,
                team_id: params.team_id,
                registrant_user_id: actor.id,
                note: params.note,
                participants,
            })
            .await?;

        let created = registrations.find_with_participants(registration.id).await?;
        txn.commit().await?;

        tracing::info!(
            registration_id = registration.id,
            game_id = game.id,
            user_id = actor.id,
            "Registration submitted"
        );

        created.ok_or_else(|| missing_after_write(registration.id))
    }

    /// Approves or rejects a registration on behalf of `actor`.
    pub async fn review(
        &self,
        actor: &entity::user::Model,
        id: i32,
        decision: ReviewDecision,
        client: &ClientInfo,
    ) -> Result<RegistrationWithParticipants, AppError> {
        let txn = self.db.begin().await?;
        let registrations = RegistrationRepository::new(&txn);

        let Some(registration) = registrations.find_by_id(id).await? else {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        };
        let previous = registration.status;

        let registration = registrations
            .review(registration, decision.status(), actor.id, Utc::now())
            .await?;

        record_on(
            &txn,
            CreateActivityLogParams::new(decision.action(), "registration")
                .entity_id(registration.id)
                .user_id(actor.id)
                .description(format!(
                    "{} registration {}",
                    match decision {
                        ReviewDecision::Approve => "Approved",
                        ReviewDecision::Reject => "Rejected",
                    },
                    registration.id
                ))
                .metadata(json!({
                    "gameId": registration.game_id,
                    "categoryId": registration.category_id,
                    "previousStatus": status_name(previous),
                }))
                .client(client),
        )
        .await?;

        let reviewed = registrations.find_with_participants(registration.id).await?;
        txn.commit().await?;

        reviewed.ok_or_else(|| missing_after_write(id))
    }

    /// Replaces the participants and note of the caller's own registration. Omitting the
    /// note clears it.
    ///
    /// # Returns
    /// - `Ok(registration)` - Updated registration; a rejected one is pending again
    /// - `Err(AppError::NotFound)` - Missing or registered by another user
    /// - `Err(AppError::BadRequest)` - Locked, signup closed or invalid participants
    pub async fn resubmit(
        &self,
        actor: &entity::user::Model,
        params: ResubmitParams,
        now: DateTime<Utc>,
    ) -> Result<RegistrationWithParticipants, AppError> {
        let txn = self.db.begin().await?;
        let registrations = RegistrationRepository::new(&txn);

        let registration = registrations
            .find_by_id(params.registration_id)
            .await?
            .filter(|r| Permission::ResourceOwner(r.registrant_user_id).allows(actor))
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

        if is_locked(registration.status) {
            return Err(AppError::BadRequest("已確認的報名無法修改".to_string()));
        }

        let game = GameRepository::new(&txn)
            .find_by_id(registration.game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("找不到此比賽".to_string()))?;
        if now > game.signup_end {
            return Err(AppError::BadRequest("報名時間已截止".to_string()));
        }

        let participants = ParticipantParams::from_dtos(params.participants)?;
        check_eligibility(&txn, &participants, actor.id, registration.team_id, now).await?;

        registrations
            .replace_participants(registration.id, &participants)
            .await?;
        let registration = registrations
            .resubmit(registration, params.note, now)
            .await?;

        let updated = registrations.find_with_participants(registration.id).await?;
        txn.commit().await?;

        updated.ok_or_else(|| missing_after_write(registration.id))
    }

    /// One registration, visible to its registrant and to admins.
    pub async fn get(
        &self,
        actor: &entity::user::Model,
        id: i32,
    ) -> Result<RegistrationWithParticipants, AppError> {
        RegistrationRepository::new(self.db)
            .find_with_participants(id)
            .await?
            .filter(|r| {
                Permission::Admin.allows(actor)
                    || Permission::ResourceOwner(r.registration.registrant_user_id).allows(actor)
            })
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Registrations submitted by `actor`, optionally narrowed by game and status.
    pub async fn list_mine(
        &self,
        actor: &entity::user::Model,
        game_id: Option<i32>,
        status: Option<RegistrationStatus>,
    ) -> Result<Vec<RegistrationWithParticipants>, AppError> {
        Ok(RegistrationRepository::new(self.db)
            .list(RegistrationFilter {
                registrant_user_id: Some(actor.id),
                game_id,
                status,
            })
            .await?)
    }

    /// Every registration of a game, newest first.
    pub async fn list_for_game(
        &self,
        game_id: i32,
    ) -> Result<Vec<RegistrationWithParticipants>, AppError> {
        if GameRepository::new(self.db)
            .find_by_id(game_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("找不到此比賽".to_string()));
        }

        Ok(RegistrationRepository::new(self.db)
            .list(RegistrationFilter {
                game_id: Some(game_id),
                ..Default::default()
            })
            .await?)
    }
}

/// Approved and confirmed registrations can no longer be changed by the registrant.
pub fn is_locked(status: RegistrationStatus) -> bool {
    matches!(
        status,
        RegistrationStatus::Approved | RegistrationStatus::Confirmed
    )
}

fn status_name(status: RegistrationStatus) -> &'static str {
    match status {
        RegistrationStatus::Pending => "pending",
        RegistrationStatus::Approved => "approved",
        RegistrationStatus::Confirmed => "confirmed",
        RegistrationStatus::Rejected => "rejected",
    }
}

/// Every user player must belong to `user_id` and every team member to `team_id`, none of
/// them banned at `now`. Team members without a team never qualify.
async fn check_eligibility<C: ConnectionTrait>(
    db: &C,
    participants: &[ParticipantParams],
    user_id: i32,
    team_id: Option<i32>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let invalid = || AppError::BadRequest("部分隊員不存在或已被禁賽".to_string());

    let player_ids = distinct(ParticipantParams::user_player_ids(participants));
    let member_ids = distinct(ParticipantParams::team_member_ids(participants));

    let players = UserPlayerRepository::new(db)
        .find_eligible(&player_ids, user_id, now)
        .await?;
    if players.len() != player_ids.len() {
        return Err(invalid());
    }

    if !member_ids.is_empty() {
        let team_id = team_id.ok_or_else(invalid)?;
        let members = TeamMemberRepository::new(db)
            .find_eligible(&member_ids, team_id, now)
            .await?;
        if members.len() != member_ids.len() {
            return Err(invalid());
        }
    }

    Ok(())
}

fn missing_after_write(id: i32) -> AppError {
    InternalError::MissingAfterWrite {
        entity: "registration",
        id,
    }
    .into()
}

fn distinct(mut ids: Vec<i32>) -> Vec<i32> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod test;
