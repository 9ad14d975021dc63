use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::{
        api::SuccessDto,
        team::{
            BatchCreateTeamMembersDto, CreateTeamMemberDto, TeamMemberDto, TeamMemberInputDto,
            UpdateTeamMemberDto,
        },
    },
};

impl ApiClient {
    pub async fn list_team_members(&self, team_id: i32) -> Result<Vec<TeamMemberDto>, ApiError> {
        fetch(self.get("/api/team_member")?.query(&[("teamId", team_id)])).await
    }

    pub async fn create_team_member(
        &self,
        team_id: i32,
        member: TeamMemberInputDto,
    ) -> Result<TeamMemberDto, ApiError> {
        let payload = CreateTeamMemberDto { team_id, member };
        fetch(self.post("/api/team_member")?.json(&payload)).await
    }

    pub async fn create_team_members_batch(
        &self,
        team_id: i32,
        members: Vec<TeamMemberInputDto>,
    ) -> Result<Vec<TeamMemberDto>, ApiError> {
        let payload = BatchCreateTeamMembersDto { team_id, members };
        fetch(self.post("/api/team_member/batch")?.json(&payload)).await
    }

    pub async fn update_team_member(
        &self,
        id: i32,
        payload: &UpdateTeamMemberDto,
    ) -> Result<TeamMemberDto, ApiError> {
        fetch(self.put(&format!("/api/team_member/{}", id))?.json(payload)).await
    }

    pub async fn delete_team_member(&self, id: i32) -> Result<SuccessDto, ApiError> {
        fetch(self.delete(&format!("/api/team_member/{}", id))?).await
    }
}
