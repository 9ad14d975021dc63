use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::{
        api::SuccessDto,
        team::{CreateTeamStaffDto, StaffRoleDto, TeamStaffDto, UpdateTeamStaffDto},
    },
};

impl ApiClient {
    pub async fn list_team_staff(
        &self,
        team_id: i32,
        role: Option<StaffRoleDto>,
    ) -> Result<Vec<TeamStaffDto>, ApiError> {
        let mut query = vec![("teamId", team_id.to_string())];
        if let Some(role) = role {
            let role = match role {
                StaffRoleDto::Leader => "leader",
                StaffRoleDto::Coach => "coach",
            };
            query.push(("role", role.to_string()));
        }
        fetch(self.get("/api/team_staff")?.query(&query)).await
    }

    pub async fn create_team_staff(&self, payload: &CreateTeamStaffDto) -> Result<TeamStaffDto, ApiError> {
        fetch(self.post("/api/team_staff")?.json(payload)).await
    }

    pub async fn update_team_staff(
        &self,
        id: i32,
        payload: &UpdateTeamStaffDto,
    ) -> Result<TeamStaffDto, ApiError> {
        fetch(self.put(&format!("/api/team_staff/{}", id))?.json(payload)).await
    }

    pub async fn delete_team_staff(&self, id: i32) -> Result<SuccessDto, ApiError> {
        fetch(self.delete(&format!("/api/team_staff/{}", id))?).await
    }
}
