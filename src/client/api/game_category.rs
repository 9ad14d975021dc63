use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::{
        api::SuccessDto,
        game::{CreateGameCategoryDto, GameCategoryDto, UpdateGameCategoryDto},
    },
};

impl ApiClient {
    pub async fn list_game_categories(&self, game_id: i32) -> Result<Vec<GameCategoryDto>, ApiError> {
        fetch(self.get("/api/game_category")?.query(&[("gameId", game_id)])).await
    }

    pub async fn create_game_category(
        &self,
        payload: &CreateGameCategoryDto,
    ) -> Result<GameCategoryDto, ApiError> {
        fetch(self.post("/api/game_category")?.json(payload)).await
    }

    pub async fn update_game_category(
        &self,
        id: i32,
        payload: &UpdateGameCategoryDto,
    ) -> Result<GameCategoryDto, ApiError> {
        fetch(self.put(&format!("/api/game_category/{}", id))?.json(payload)).await
    }

    pub async fn delete_game_category(&self, id: i32) -> Result<SuccessDto, ApiError> {
        fetch(self.delete(&format!("/api/game_category/{}", id))?).await
    }
}
