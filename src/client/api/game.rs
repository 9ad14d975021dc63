use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::{
        api::SuccessDto,
        game::{GameDetailDto, GameFeeDto, GameListItemDto, GameWithDetailsDto, UpsertGameDto},
    },
};

impl ApiClient {
    /// Lists games, optionally restricted to one region code.
    pub async fn list_games(&self, region: Option<&str>) -> Result<Vec<GameListItemDto>, ApiError> {
        let mut request = self.get("/api/games")?;
        if let Some(region) = region {
            request = request.query(&[("region", region)]);
        }
        fetch(request).await
    }

    pub async fn get_game(&self, id: i32) -> Result<GameWithDetailsDto, ApiError> {
        fetch(self.get(&format!("/api/games/{}", id))?).await
    }

    pub async fn create_game(&self, payload: &UpsertGameDto) -> Result<GameWithDetailsDto, ApiError> {
        fetch(self.post("/api/games")?.json(payload)).await
    }

    pub async fn update_game(
        &self,
        id: i32,
        payload: &UpsertGameDto,
    ) -> Result<GameWithDetailsDto, ApiError> {
        fetch(self.put(&format!("/api/games/{}", id))?.json(payload)).await
    }

    pub async fn delete_game(&self, id: i32) -> Result<SuccessDto, ApiError> {
        fetch(self.delete(&format!("/api/games/{}", id))?).await
    }

    pub async fn list_game_fees(
        &self,
        game_id: Option<i32>,
        category_id: Option<i32>,
    ) -> Result<Vec<GameFeeDto>, ApiError> {
        let mut query = Vec::new();
        if let Some(game_id) = game_id {
            query.push(("gameId", game_id));
        }
        if let Some(category_id) = category_id {
            query.push(("categoryId", category_id));
        }
        fetch(self.get("/api/game_fee")?.query(&query)).await
    }

    pub async fn get_game_detail(&self, game_id: i32) -> Result<Option<GameDetailDto>, ApiError> {
        fetch(self.get("/api/game_detail")?.query(&[("gameId", game_id)])).await
    }
}
