//! Game service: listings, detail reads and the nested create/update/delete writes.
//!
//! A game write touches up to four tables (game, detail, categories, fees). Each write runs in
//! one transaction together with its activity log entry, so a failed fee insert leaves no
//! half-written game behind.

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde_json::json;

use crate::server::{
    data::{
        game::GameRepository, game_category::GameCategoryRepository,
        game_detail::GameDetailRepository, game_fee::GameFeeRepository,
    },
    error::{internal::InternalError, AppError},
    model::{
        activity_log::{ClientInfo, CreateActivityLogParams},
        game::{
            CategoryParams, FeeParams, Game, GameWithCounts, GameWithDetails, UpsertGameParams,
        },
    },
    service::activity_log::record_on,
};

pub struct GameService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GameService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, region: Option<&str>) -> Result<Vec<GameWithCounts>, AppError> {
        Ok(GameRepository::new(self.db).list(region).await?)
    }

    /// Loads a game with its detail, categories and fees.
    ///
    /// # Returns
    /// - `Ok(Some(game))` - Game found
    /// - `Ok(None)` - No game with this id
    pub async fn get(&self, id: i32) -> Result<Option<GameWithDetails>, AppError> {
        load_details(self.db, id).await
    }

    /// Creates a game with its detail, categories and fees.
    pub async fn create(
        &self,
        actor: &entity::user::Model,
        params: UpsertGameParams,
        client: &ClientInfo,
    ) -> Result<GameWithDetails, AppError> {
        let txn = self.db.begin().await?;

        let game = GameRepository::new(&txn).create(params.fields).await?;

        if let Some(detail) = params.detail {
            GameDetailRepository::new(&txn).upsert(game.id, detail).await?;
        }
        let categories = params.categories.unwrap_or_default();
        write_categories_and_fees(&txn, game.id, categories, params.fees).await?;

        record_on(
            &txn,
            CreateActivityLogParams::new("create", "game")
                .entity_id(game.id)
                .user_id(actor.id)
                .description(format!("Created game {}", game.name))
                .metadata(json!({ "name": game.name, "region": game.region }))
                .client(client),
        )
        .await?;

        let created = load_details(&txn, game.id).await?;
        txn.commit().await?;

        created.ok_or_else(|| missing_after_write(game.id))
    }

    /// Updates a game. Categories and fees are replaced only when the payload carries a
    /// category list.
    ///
    /// # Returns
    /// - `Ok(game)` - Updated game with its nested rows
    /// - `Err(AppError::NotFound)` - No game with this id
    /// - `Err(AppError::BadRequest)` - Categories supplied while registrations exist
    pub async fn update(
        &self,
        actor: &entity::user::Model,
        id: i32,
        params: UpsertGameParams,
        client: &ClientInfo,
    ) -> Result<GameWithDetails, AppError> {
        let txn = self.db.begin().await?;
        let game_repo = GameRepository::new(&txn);

        let Some(game) = game_repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("賽事不存在".to_string()));
        };

        if params.categories.is_some() && game_repo.count_registrations(id).await? > 0 {
            return Err(AppError::BadRequest(
                "已有隊伍報名，無法修改賽事類別".to_string(),
            ));
        }

        let game = game_repo.update(game, params.fields).await?;

        if let Some(detail) = params.detail {
            GameDetailRepository::new(&txn).upsert(game.id, detail).await?;
        }
        if let Some(categories) = params.categories {
            GameFeeRepository::new(&txn).delete_by_game(game.id).await?;
            GameCategoryRepository::new(&txn)
                .delete_by_game(game.id)
                .await?;
            write_categories_and_fees(&txn, game.id, categories, params.fees).await?;
        }

        record_on(
            &txn,
            CreateActivityLogParams::new("update", "game")
                .entity_id(game.id)
                .user_id(actor.id)
                .description(format!("Updated game {}", game.name))
                .client(client),
        )
        .await?;

        let updated = load_details(&txn, game.id).await?;
        txn.commit().await?;

        updated.ok_or_else(|| missing_after_write(id))
    }

    /// Deletes a game that nobody has registered for.
    pub async fn delete(
        &self,
        actor: &entity::user::Model,
        id: i32,
        client: &ClientInfo,
    ) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let game_repo = GameRepository::new(&txn);

        let Some(game) = game_repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("賽事不存在".to_string()));
        };
        if game_repo.count_registrations(id).await? > 0 {
            return Err(AppError::BadRequest("已有隊伍報名，無法刪除賽事".to_string()));
        }

        game_repo.delete(id).await?;

        record_on(
            &txn,
            CreateActivityLogParams::new("delete", "game")
                .entity_id(id)
                .user_id(actor.id)
                .description(format!("Deleted game {}", game.name))
                .client(client),
        )
        .await?;

        txn.commit().await?;

        Ok(())
    }

    pub async fn detail(
        &self,
        game_id: i32,
    ) -> Result<Option<entity::game_detail::Model>, AppError> {
        Ok(GameDetailRepository::new(self.db)
            .find_by_game(game_id)
            .await?)
    }

    pub async fn fees(
        &self,
        game_id: Option<i32>,
        category_id: Option<i32>,
    ) -> Result<Vec<entity::game_fee::Model>, AppError> {
        Ok(GameFeeRepository::new(self.db)
            .find(game_id, category_id)
            .await?)
    }
}

/// Inserts categories in order, then fees linked through their category index.
async fn write_categories_and_fees(
    txn: &DatabaseTransaction,
    game_id: i32,
    categories: Vec<CategoryParams>,
    fees: Vec<FeeParams>,
) -> Result<(), AppError> {
    let category_repo = GameCategoryRepository::new(txn);
    let mut category_ids = Vec::with_capacity(categories.len());
    for category in categories {
        category_ids.push(category_repo.create(game_id, category).await?.id);
    }

    let fee_repo = GameFeeRepository::new(txn);
    for fee in fees {
        let category_id = fee
            .category_index
            .and_then(|index| category_ids.get(index).copied());
        fee_repo.create(game_id, category_id, fee).await?;
    }

    Ok(())
}

async fn load_details<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<GameWithDetails>, AppError> {
    let Some(game) = GameRepository::new(db).find_by_id(id).await? else {
        return Ok(None);
    };

    Ok(Some(GameWithDetails {
        detail: GameDetailRepository::new(db).find_by_game(id).await?,
        categories: GameCategoryRepository::new(db).find_by_game(id).await?,
        fees: GameFeeRepository::new(db).find(Some(id), None).await?,
        game: Game::from_entity(game),
    }))
}

fn missing_after_write(id: i32) -> AppError {
    InternalError::MissingAfterWrite { entity: "game", id }.into()
}
