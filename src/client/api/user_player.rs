use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::{
        api::SuccessDto,
        user_player::{CreateUserPlayerDto, UpdateUserPlayerDto, UserPlayerDto},
    },
};

impl ApiClient {
    pub async fn list_user_players(&self, include_banned: bool) -> Result<Vec<UserPlayerDto>, ApiError> {
        fetch(
            self.get("/api/user_player")?
                .query(&[("includeBanned", include_banned)]),
        )
        .await
    }

    pub async fn create_user_player(
        &self,
        payload: &CreateUserPlayerDto,
    ) -> Result<UserPlayerDto, ApiError> {
        fetch(self.post("/api/user_player")?.json(payload)).await
    }

    pub async fn update_user_player(
        &self,
        id: i32,
        payload: &UpdateUserPlayerDto,
    ) -> Result<UserPlayerDto, ApiError> {
        fetch(self.put(&format!("/api/user_player/{}", id))?.json(payload)).await
    }

    pub async fn delete_user_player(&self, id: i32) -> Result<SuccessDto, ApiError> {
        fetch(self.delete(&format!("/api/user_player/{}", id))?).await
    }
}
