use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::registration::{
        RegistrationActionDto, RegistrationDto, RegistrationStatusDto, ResubmitDto, ReviewDto,
        SignupDto, SignupResponseDto,
    },
};

fn status_param(status: RegistrationStatusDto) -> &'static str {
    match status {
        RegistrationStatusDto::Pending => "pending",
        RegistrationStatusDto::Approved => "approved",
        RegistrationStatusDto::Confirmed => "confirmed",
        RegistrationStatusDto::Rejected => "rejected",
    }
}

impl ApiClient {
    pub async fn signup(
        &self,
        game_id: i32,
        payload: &SignupDto,
    ) -> Result<SignupResponseDto, ApiError> {
        fetch(self.post(&format!("/api/games/{}/signup", game_id))?.json(payload)).await
    }

    /// Every registration of a game. Admin only.
    pub async fn list_game_registrations(&self, game_id: i32) -> Result<Vec<RegistrationDto>, ApiError> {
        fetch(self.get(&format!("/api/games/{}/registrations", game_id))?).await
    }

    pub async fn list_my_registrations(
        &self,
        game_id: Option<i32>,
        status: Option<RegistrationStatusDto>,
    ) -> Result<Vec<RegistrationDto>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(game_id) = game_id {
            query.push(("gameId", game_id.to_string()));
        }
        if let Some(status) = status {
            query.push(("status", status_param(status).to_string()));
        }
        fetch(self.get("/api/registration")?.query(&query)).await
    }

    pub async fn get_registration(&self, id: i32) -> Result<RegistrationDto, ApiError> {
        fetch(self.get(&format!("/api/registration/{}", id))?).await
    }

    pub async fn resubmit_registration(
        &self,
        id: i32,
        payload: &ResubmitDto,
    ) -> Result<RegistrationActionDto, ApiError> {
        fetch(self.put(&format!("/api/registration/{}", id))?.json(payload)).await
    }

    pub async fn approve_registration(&self, id: i32) -> Result<RegistrationActionDto, ApiError> {
        let payload = ReviewDto { id: Some(id) };
        fetch(self.post("/api/registration/approve")?.json(&payload)).await
    }

    pub async fn reject_registration(&self, id: i32) -> Result<RegistrationActionDto, ApiError> {
        let payload = ReviewDto { id: Some(id) };
        fetch(self.post("/api/registration/reject")?.json(&payload)).await
    }
}
