use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::game::CategoryParams;

pub struct GameCategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GameCategoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::game_category::Model>, DbErr> {
        entity::prelude::GameCategory::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Categories of a game in creation order.
    pub async fn find_by_game(
        &self,
        game_id: i32,
    ) -> Result<Vec<entity::game_category::Model>, DbErr> {
        entity::prelude::GameCategory::find()
            .filter(entity::game_category::Column::GameId.eq(game_id))
            .order_by_asc(entity::game_category::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn create(
        &self,
        game_id: i32,
        params: CategoryParams,
    ) -> Result<entity::game_category::Model, DbErr> {
        entity::game_category::ActiveModel {
            game_id: ActiveValue::Set(game_id),
            category_name: ActiveValue::Set(params.category_name),
            conditions: ActiveValue::Set(params.conditions),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn update(
        &self,
        category: entity::game_category::Model,
        params: CategoryParams,
    ) -> Result<entity::game_category::Model, DbErr> {
        let mut active = category.into_active_model();
        active.category_name = ActiveValue::Set(params.category_name);
        active.conditions = ActiveValue::Set(params.conditions);
        active.update(self.db).await
    }

    /// Deletes one category; its fees cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::GameCategory::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes every category of a game; category fees cascade.
    pub async fn delete_by_game(&self, game_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::GameCategory::delete_many()
            .filter(entity::game_category::Column::GameId.eq(game_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn count_registrations(&self, category_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Registration::find()
            .filter(entity::registration::Column::CategoryId.eq(category_id))
            .count(self.db)
            .await
    }
}
