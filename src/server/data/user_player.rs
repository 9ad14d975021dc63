//! User player data repository.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Condition, Expr},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::user_player::{CreateUserPlayerParams, UpdateUserPlayerParams};

pub struct UserPlayerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserPlayerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user_player::Model>, DbErr> {
        entity::prelude::UserPlayer::find_by_id(id).one(self.db).await
    }

    /// Players owned by `user_id`, newest first. Players banned at `now` are left out unless
    /// `include_banned` is set.
    pub async fn find_by_user(
        &self,
        user_id: i32,
        include_banned: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<entity::user_player::Model>, DbErr> {
        let mut select = entity::prelude::UserPlayer::find()
            .filter(entity::user_player::Column::UserId.eq(user_id));

        if !include_banned {
            select = select.filter(not_banned_at(now));
        }

        select
            .order_by_desc(entity::user_player::Column::CreatedAt)
            .order_by_desc(entity::user_player::Column::Id)
            .all(self.db)
            .await
    }

    /// Players among `ids` owned by `user_id` and not banned at `now`.
    pub async fn find_eligible(
        &self,
        ids: &[i32],
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<entity::user_player::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::UserPlayer::find()
            .filter(entity::user_player::Column::Id.is_in(ids.iter().copied()))
            .filter(entity::user_player::Column::UserId.eq(user_id))
            .filter(not_banned_at(now))
            .all(self.db)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<entity::user_player::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::UserPlayer::find()
            .filter(entity::user_player::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Number of registrations each of `ids` takes part in. Players without any are absent.
    pub async fn participation_counts(&self, ids: &[i32]) -> Result<HashMap<i32, u64>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<Option<i32>> = entity::prelude::RegistrationParticipant::find()
            .select_only()
            .column(entity::registration_participant::Column::UserPlayerId)
            .filter(
                entity::registration_participant::Column::UserPlayerId.is_in(ids.iter().copied()),
            )
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts = HashMap::new();
        for id in rows.into_iter().flatten() {
            *counts.entry(id).or_insert(0) += 1;
        }

        Ok(counts)
    }

    pub async fn create(
        &self,
        params: CreateUserPlayerParams,
    ) -> Result<entity::user_player::Model, DbErr> {
        let now = Utc::now();
        entity::user_player::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            name: ActiveValue::Set(params.name),
            gender: ActiveValue::Set(params.gender),
            birthday: ActiveValue::Set(params.birthday),
            is_banned: ActiveValue::Set(false),
            ban_reason: ActiveValue::Set(None),
            ban_until: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn update(
        &self,
        player: entity::user_player::Model,
        params: UpdateUserPlayerParams,
    ) -> Result<entity::user_player::Model, DbErr> {
        let mut active = player.into_active_model();

        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(gender) = params.gender {
            active.gender = ActiveValue::Set(gender);
        }
        if let Some(birthday) = params.birthday {
            active.birthday = ActiveValue::Set(birthday);
        }
        if let Some(is_banned) = params.is_banned {
            active.is_banned = ActiveValue::Set(is_banned);
        }
        if let Some(ban_reason) = params.ban_reason {
            active.ban_reason = ActiveValue::Set(ban_reason);
        }
        if let Some(ban_until) = params.ban_until {
            active.ban_until = ActiveValue::Set(ban_until);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::UserPlayer::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Clears player bans whose `ban_until` has passed.
    pub async fn lift_expired_bans(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::UserPlayer::update_many()
            .col_expr(entity::user_player::Column::IsBanned, Expr::value(false))
            .col_expr(
                entity::user_player::Column::BanReason,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::user_player::Column::BanUntil,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .col_expr(entity::user_player::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user_player::Column::IsBanned.eq(true))
            .filter(entity::user_player::Column::BanUntil.is_not_null())
            .filter(entity::user_player::Column::BanUntil.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

fn not_banned_at(now: DateTime<Utc>) -> Condition {
    Condition::any()
        .add(entity::user_player::Column::IsBanned.eq(false))
        .add(
            Condition::all()
                .add(entity::user_player::Column::BanUntil.is_not_null())
                .add(entity::user_player::Column::BanUntil.lte(now)),
        )
}
