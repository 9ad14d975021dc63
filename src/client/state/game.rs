use crate::{
    client::{api::ApiClient, model::error::ApiError, state::Query},
    model::game::{GameListItemDto, GameWithDetailsDto, UpsertGameDto},
};

pub struct GamesState {
    client: ApiClient,
    region: std::sync::Mutex<Option<String>>,
    pub games: Query<Vec<GameListItemDto>>,
    pub current: Query<GameWithDetailsDto>,
}

impl GamesState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            region: std::sync::Mutex::new(None),
            games: Query::new(),
            current: Query::new(),
        }
    }

    /// Lists games for `region` and remembers the filter for later refreshes.
    pub async fn fetch_games(
        &self,
        region: Option<&str>,
    ) -> Result<Vec<GameListItemDto>, ApiError> {
        if let Ok(mut current) = self.region.lock() {
            *current = region.map(str::to_string);
        }
        self.refresh().await
    }

    pub async fn refresh(&self) -> Result<Vec<GameListItemDto>, ApiError> {
        let region = self.region.lock().ok().and_then(|r| r.clone());
        self.games
            .run(|| self.client.list_games(region.as_deref()))
            .await
    }

    pub async fn fetch_game(&self, id: i32) -> Result<GameWithDetailsDto, ApiError> {
        self.current.run(|| self.client.get_game(id)).await
    }

    pub async fn create_game(&self, payload: &UpsertGameDto) -> Result<GameWithDetailsDto, ApiError> {
        let game = self.client.create_game(payload).await?;
        self.current.set(game.clone());
        self.refresh().await?;
        Ok(game)
    }

    pub async fn update_game(
        &self,
        id: i32,
        payload: &UpsertGameDto,
    ) -> Result<GameWithDetailsDto, ApiError> {
        let game = self.client.update_game(id, payload).await?;
        self.current.set(game.clone());
        self.refresh().await?;
        Ok(game)
    }

    pub async fn delete_game(&self, id: i32) -> Result<(), ApiError> {
        self.client.delete_game(id).await?;
        if self.current.data().is_some_and(|g| g.game.id == id) {
            self.current.clear();
        }
        self.refresh().await?;
        Ok(())
    }
}
