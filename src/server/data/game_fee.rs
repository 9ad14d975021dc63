use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::game::FeeParams;

pub struct GameFeeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GameFeeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Fees in creation order, filtered by game and/or category when given.
    pub async fn find(
        &self,
        game_id: Option<i32>,
        category_id: Option<i32>,
    ) -> Result<Vec<entity::game_fee::Model>, DbErr> {
        let mut select = entity::prelude::GameFee::find();
        if let Some(game_id) = game_id {
            select = select.filter(entity::game_fee::Column::GameId.eq(game_id));
        }
        if let Some(category_id) = category_id {
            select = select.filter(entity::game_fee::Column::CategoryId.eq(category_id));
        }

        select
            .order_by_asc(entity::game_fee::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn create(
        &self,
        game_id: i32,
        category_id: Option<i32>,
        params: FeeParams,
    ) -> Result<entity::game_fee::Model, DbErr> {
        entity::game_fee::ActiveModel {
            game_id: ActiveValue::Set(game_id),
            category_id: ActiveValue::Set(category_id),
            fee_type: ActiveValue::Set(params.fee_type),
            description: ActiveValue::Set(params.description),
            amount: ActiveValue::Set(params.amount),
            is_required: ActiveValue::Set(params.is_required),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn delete_by_game(&self, game_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::GameFee::delete_many()
            .filter(entity::game_fee::Column::GameId.eq(game_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
