//! Game data repository.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::game::{Game, GameFields, GameWithCounts};

pub struct GameRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GameRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::game::Model>, DbErr> {
        entity::prelude::Game::find_by_id(id).one(self.db).await
    }

    /// Lists games newest first with their registration and category counts.
    ///
    /// # Arguments
    /// - `region` - Only games in this region code when given
    pub async fn list(&self, region: Option<&str>) -> Result<Vec<GameWithCounts>, DbErr> {
        let mut select = entity::prelude::Game::find();
        if let Some(region) = region {
            select = select.filter(entity::game::Column::Region.eq(region));
        }

        let games = select
            .order_by_desc(entity::game::Column::CreatedAt)
            .order_by_desc(entity::game::Column::Id)
            .all(self.db)
            .await?;

        if games.is_empty() {
            return Ok(Vec::new());
        }

        let game_ids: Vec<i32> = games.iter().map(|g| g.id).collect();

        let registration_game_ids: Vec<i32> = entity::prelude::Registration::find()
            .select_only()
            .column(entity::registration::Column::GameId)
            .filter(entity::registration::Column::GameId.is_in(game_ids.clone()))
            .into_tuple()
            .all(self.db)
            .await?;

        let category_game_ids: Vec<i32> = entity::prelude::GameCategory::find()
            .select_only()
            .column(entity::game_category::Column::GameId)
            .filter(entity::game_category::Column::GameId.is_in(game_ids))
            .into_tuple()
            .all(self.db)
            .await?;

        let registration_counts = tally(registration_game_ids);
        let category_counts = tally(category_game_ids);

        Ok(games
            .into_iter()
            .map(|game| GameWithCounts {
                registration_count: registration_counts.get(&game.id).copied().unwrap_or(0),
                category_count: category_counts.get(&game.id).copied().unwrap_or(0),
                game: Game::from_entity(game),
            })
            .collect())
    }

    pub async fn create(&self, fields: GameFields) -> Result<entity::game::Model, DbErr> {
        let now = Utc::now();
        entity::game::ActiveModel {
            name: ActiveValue::Set(fields.name),
            region: ActiveValue::Set(fields.region),
            venue: ActiveValue::Set(fields.venue),
            address: ActiveValue::Set(fields.address),
            signup_start: ActiveValue::Set(fields.signup_start),
            signup_end: ActiveValue::Set(fields.signup_end),
            game_start: ActiveValue::Set(fields.game_start),
            game_end: ActiveValue::Set(fields.game_end),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn update(
        &self,
        game: entity::game::Model,
        fields: GameFields,
    ) -> Result<entity::game::Model, DbErr> {
        let mut active = game.into_active_model();
        active.name = ActiveValue::Set(fields.name);
        active.region = ActiveValue::Set(fields.region);
        active.venue = ActiveValue::Set(fields.venue);
        active.address = ActiveValue::Set(fields.address);
        active.signup_start = ActiveValue::Set(fields.signup_start);
        active.signup_end = ActiveValue::Set(fields.signup_end);
        active.game_start = ActiveValue::Set(fields.game_start);
        active.game_end = ActiveValue::Set(fields.game_end);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    /// Deletes a game. Detail, categories and fees cascade; registrations restrict.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Game::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Game::find().count(self.db).await
    }

    pub async fn count_registrations(&self, game_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Registration::find()
            .filter(entity::registration::Column::GameId.eq(game_id))
            .count(self.db)
            .await
    }
}

fn tally(ids: Vec<i32>) -> HashMap<i32, u64> {
    let mut counts = HashMap::new();
    for id in ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    #[tokio::test]
    async fn lists_with_counts_and_region_filter() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_registration_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let (user, game, category) = factory::helpers::create_open_game_for_user(db).await?;
        factory::create_category(db, game.id).await?;
        factory::create_registration(db, game.id, category.id, user.id).await?;
        factory::game::GameFactory::new(db)
            .region("keelung")
            .build()
            .await?;

        let repo = GameRepository::new(db);

        let all = repo.list(None).await?;
        assert_eq!(all.len(), 2);

        let taipei = repo.list(Some("taipei")).await?;
        assert_eq!(taipei.len(), 1);
        assert_eq!(taipei[0].game.id, game.id);
        assert_eq!(taipei[0].registration_count, 1);
        assert_eq!(taipei[0].category_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_categories_and_fees() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_registration_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let game = factory::create_game(db).await?;
        let category = factory::create_category(db, game.id).await?;
        factory::game::create_fee(db, game.id, Some(category.id), 800).await?;

        GameRepository::new(db).delete(game.id).await?;

        assert_eq!(entity::prelude::GameCategory::find().count(db).await?, 0);
        assert_eq!(entity::prelude::GameFee::find().count(db).await?, 0);

        Ok(())
    }
}
