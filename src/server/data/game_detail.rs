use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

use crate::server::model::game::GameDetailParams;

/// Repository for the optional per-game detail row.
pub struct GameDetailRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GameDetailRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_game(
        &self,
        game_id: i32,
    ) -> Result<Option<entity::game_detail::Model>, DbErr> {
        entity::prelude::GameDetail::find()
            .filter(entity::game_detail::Column::GameId.eq(game_id))
            .one(self.db)
            .await
    }

    /// Creates the detail row or overwrites both fields of the existing one.
    pub async fn upsert(
        &self,
        game_id: i32,
        params: GameDetailParams,
    ) -> Result<entity::game_detail::Model, DbErr> {
        let now = Utc::now();

        match self.find_by_game(game_id).await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.basis = ActiveValue::Set(params.basis);
                active.note = ActiveValue::Set(params.note);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await
            }
            None => {
                entity::game_detail::ActiveModel {
                    game_id: ActiveValue::Set(game_id),
                    basis: ActiveValue::Set(params.basis),
                    note: ActiveValue::Set(params.note),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(self.db)
                .await
            }
        }
    }
}
