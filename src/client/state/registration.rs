use crate::{
    client::{api::ApiClient, model::error::ApiError, state::Query},
    model::registration::{
        RegistrationActionDto, RegistrationDto, RegistrationStatusDto, ResubmitDto, SignupDto,
    },
};

/// The caller's registrations, and for admins the registrations of the game under review.
pub struct RegistrationsState {
    client: ApiClient,
    pub mine: Query<Vec<RegistrationDto>>,
    pub for_game: Query<Vec<RegistrationDto>>,
}

impl RegistrationsState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            mine: Query::new(),
            for_game: Query::new(),
        }
    }

    pub async fn fetch_mine(
        &self,
        game_id: Option<i32>,
        status: Option<RegistrationStatusDto>,
    ) -> Result<Vec<RegistrationDto>, ApiError> {
        self.mine
            .run(|| self.client.list_my_registrations(game_id, status))
            .await
    }

    pub async fn fetch_for_game(&self, game_id: i32) -> Result<Vec<RegistrationDto>, ApiError> {
        self.for_game
            .run(|| self.client.list_game_registrations(game_id))
            .await
    }

    pub async fn signup(&self, game_id: i32, payload: &SignupDto) -> Result<RegistrationDto, ApiError> {
        let response = self.client.signup(game_id, payload).await?;
        self.fetch_mine(None, None).await?;
        Ok(response.data)
    }

    pub async fn resubmit(
        &self,
        id: i32,
        payload: &ResubmitDto,
    ) -> Result<RegistrationActionDto, ApiError> {
        let response = self.client.resubmit_registration(id, payload).await?;
        self.fetch_mine(None, None).await?;
        Ok(response)
    }

    pub async fn approve(&self, id: i32) -> Result<RegistrationActionDto, ApiError> {
        let response = self.client.approve_registration(id).await?;
        self.fetch_for_game(response.registration.game_id).await?;
        Ok(response)
    }

    pub async fn reject(&self, id: i32) -> Result<RegistrationActionDto, ApiError> {
        let response = self.client.reject_registration(id).await?;
        self.fetch_for_game(response.registration.game_id).await?;
        Ok(response)
    }
}
