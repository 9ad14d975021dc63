use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::{
        api::SuccessDto,
        team::{TeamDto, TeamNameDto, TeamSummaryDto},
    },
};

impl ApiClient {
    pub async fn list_teams(&self) -> Result<Vec<TeamSummaryDto>, ApiError> {
        fetch(self.get("/api/team")?).await
    }

    pub async fn get_team(&self, id: i32) -> Result<TeamSummaryDto, ApiError> {
        fetch(self.get(&format!("/api/team/{}", id))?).await
    }

    pub async fn create_team(&self, name: &str) -> Result<TeamDto, ApiError> {
        let payload = TeamNameDto {
            name: name.to_string(),
        };
        fetch(self.post("/api/team")?.json(&payload)).await
    }

    pub async fn update_team(&self, id: i32, name: &str) -> Result<TeamDto, ApiError> {
        let payload = TeamNameDto {
            name: name.to_string(),
        };
        fetch(self.put(&format!("/api/team/{}", id))?.json(&payload)).await
    }

    pub async fn delete_team(&self, id: i32) -> Result<SuccessDto, ApiError> {
        fetch(self.delete(&format!("/api/team/{}", id))?).await
    }
}
