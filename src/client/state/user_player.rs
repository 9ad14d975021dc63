use chrono::{DateTime, Utc};

use crate::{
    client::{api::ApiClient, model::error::ApiError, state::Query},
    model::user_player::{CreateUserPlayerDto, UpdateUserPlayerDto, UserPlayerDto},
};

pub struct UserPlayersState {
    client: ApiClient,
    pub players: Query<Vec<UserPlayerDto>>,
}

impl UserPlayersState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            players: Query::new(),
        }
    }

    /// Lists every player, banned ones included, so they can be unbanned.
    pub async fn refresh(&self) -> Result<Vec<UserPlayerDto>, ApiError> {
        self.players
            .run(|| self.client.list_user_players(true))
            .await
    }

    pub async fn create(&self, payload: &CreateUserPlayerDto) -> Result<UserPlayerDto, ApiError> {
        let player = self.client.create_user_player(payload).await?;
        self.refresh().await?;
        Ok(player)
    }

    pub async fn update(
        &self,
        id: i32,
        payload: &UpdateUserPlayerDto,
    ) -> Result<UserPlayerDto, ApiError> {
        let player = self.client.update_user_player(id, payload).await?;
        self.refresh().await?;
        Ok(player)
    }

    pub async fn ban(
        &self,
        id: i32,
        reason: &str,
        until: Option<DateTime<Utc>>,
    ) -> Result<UserPlayerDto, ApiError> {
        let payload = UpdateUserPlayerDto {
            is_banned: Some(true),
            ban_reason: Some(reason.to_string()),
            ban_until: until,
            ..Default::default()
        };
        self.update(id, &payload).await
    }

    pub async fn unban(&self, id: i32) -> Result<UserPlayerDto, ApiError> {
        let payload = UpdateUserPlayerDto {
            is_banned: Some(false),
            ..Default::default()
        };
        self.update(id, &payload).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        self.client.delete_user_player(id).await?;
        self.refresh().await?;
        Ok(())
    }
}
