use sea_orm::DatabaseConnection;

use crate::{
    model::game::UpdateGameCategoryDto,
    server::{
        data::{game::GameRepository, game_category::GameCategoryRepository},
        error::AppError,
        model::{
            activity_log::{ClientInfo, CreateActivityLogParams},
            game::{CategoryParams, GameCategoryParams},
        },
        service::activity_log::ActivityLogService,
    },
};

/// Single-category reads and writes outside of the nested game payload.
pub struct GameCategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GameCategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, game_id: i32) -> Result<Vec<entity::game_category::Model>, AppError> {
        Ok(GameCategoryRepository::new(self.db)
            .find_by_game(game_id)
            .await?)
    }

    pub async fn create(
        &self,
        actor: &entity::user::Model,
        params: GameCategoryParams,
        client: &ClientInfo,
    ) -> Result<entity::game_category::Model, AppError> {
        if GameRepository::new(self.db)
            .find_by_id(params.game_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("找不到此比賽".to_string()));
        }

        let category = GameCategoryRepository::new(self.db)
            .create(params.game_id, params.category)
            .await?;

        self.log(actor, "create", &category, client).await?;

        Ok(category)
    }

    pub async fn update(
        &self,
        actor: &entity::user::Model,
        id: i32,
        dto: UpdateGameCategoryDto,
        client: &ClientInfo,
    ) -> Result<entity::game_category::Model, AppError> {
        let repo = GameCategoryRepository::new(self.db);
        let category = self.find(id).await?;

        let params = CategoryParams::merge_update(&category, dto)?;
        let category = repo.update(category, params).await?;

        self.log(actor, "update", &category, client).await?;

        Ok(category)
    }

    /// Deletes a category nobody has registered for. Fees tied to it cascade.
    pub async fn delete(
        &self,
        actor: &entity::user::Model,
        id: i32,
        client: &ClientInfo,
    ) -> Result<(), AppError> {
        let repo = GameCategoryRepository::new(self.db);
        let category = self.find(id).await?;

        if repo.count_registrations(id).await? > 0 {
            return Err(AppError::BadRequest(
                "已有隊伍報名此類別，無法刪除".to_string(),
            ));
        }

        repo.delete(id).await?;
        self.log(actor, "delete", &category, client).await?;

        Ok(())
    }

    async fn find(&self, id: i32) -> Result<entity::game_category::Model, AppError> {
        GameCategoryRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("找不到此比賽類別".to_string()))
    }

    async fn log(
        &self,
        actor: &entity::user::Model,
        action: &str,
        category: &entity::game_category::Model,
        client: &ClientInfo,
    ) -> Result<(), AppError> {
        ActivityLogService::new(self.db)
            .record(
                CreateActivityLogParams::new(action, "game_category")
                    .entity_id(category.id)
                    .user_id(actor.id)
                    .description(format!(
                        "{} category {} of game {}",
                        action, category.category_name, category.game_id
                    ))
                    .client(client),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    /// Tests creating a category for a missing game.
    ///
    /// Expected: Err(NotFound) "找不到此比賽"
    #[tokio::test]
    async fn create_requires_game() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let admin = factory::user::create_admin(db).await?;

        let err = GameCategoryService::new(db)
            .create(
                &admin,
                GameCategoryParams {
                    game_id: 42,
                    category: CategoryParams {
                        category_name: "Open".to_string(),
                        conditions: None,
                    },
                },
                &ClientInfo::default(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "找不到此比賽");

        Ok(())
    }

    /// Tests a partial update that only changes the conditions.
    ///
    /// Expected: Ok with the name kept
    #[tokio::test]
    async fn update_keeps_absent_fields() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let admin = factory::user::create_admin(db).await?;
        let game = factory::create_game(db).await?;
        let category = factory::create_category(db, game.id).await?;

        let updated = GameCategoryService::new(db)
            .update(
                &admin,
                category.id,
                UpdateGameCategoryDto {
                    category_name: None,
                    conditions: Some("U18".to_string()),
                },
                &ClientInfo::default(),
            )
            .await
            .unwrap();

        assert_eq!(updated.category_name, category.category_name);
        assert_eq!(updated.conditions.as_deref(), Some("U18"));

        Ok(())
    }

    /// Tests that a category with registrations cannot be deleted.
    ///
    /// Expected: Err(BadRequest)
    #[tokio::test]
    async fn delete_blocked_by_registration() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let admin = factory::user::create_admin(db).await?;
        let (user, game, category) = factory::helpers::create_open_game_for_user(db).await?;
        factory::create_registration(db, game.id, category.id, user.id).await?;

        let err = GameCategoryService::new(db)
            .delete(&admin, category.id, &ClientInfo::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));

        Ok(())
    }
}
