use crate::{
    client::{api::ApiClient, model::error::ApiError, state::Query},
    model::team::{
        CreateTeamStaffDto, TeamDto, TeamMemberDto, TeamMemberInputDto, TeamStaffDto,
        TeamSummaryDto, UpdateTeamMemberDto, UpdateTeamStaffDto,
    },
};

/// The caller's teams. Every member or staff change refreshes the summaries, which carry the
/// rosters and counts.
pub struct TeamsState {
    client: ApiClient,
    pub teams: Query<Vec<TeamSummaryDto>>,
}

impl TeamsState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            teams: Query::new(),
        }
    }

    pub async fn refresh(&self) -> Result<Vec<TeamSummaryDto>, ApiError> {
        self.teams.run(|| self.client.list_teams()).await
    }

    pub async fn create_team(&self, name: &str) -> Result<TeamDto, ApiError> {
        let team = self.client.create_team(name).await?;
        self.refresh().await?;
        Ok(team)
    }

    pub async fn rename_team(&self, id: i32, name: &str) -> Result<TeamDto, ApiError> {
        let team = self.client.update_team(id, name).await?;
        self.refresh().await?;
        Ok(team)
    }

    pub async fn delete_team(&self, id: i32) -> Result<(), ApiError> {
        self.client.delete_team(id).await?;
        self.refresh().await?;
        Ok(())
    }

    pub async fn add_member(
        &self,
        team_id: i32,
        member: TeamMemberInputDto,
    ) -> Result<TeamMemberDto, ApiError> {
        let member = self.client.create_team_member(team_id, member).await?;
        self.refresh().await?;
        Ok(member)
    }

    pub async fn add_members(
        &self,
        team_id: i32,
        members: Vec<TeamMemberInputDto>,
    ) -> Result<Vec<TeamMemberDto>, ApiError> {
        let members = self
            .client
            .create_team_members_batch(team_id, members)
            .await?;
        self.refresh().await?;
        Ok(members)
    }

    pub async fn update_member(
        &self,
        id: i32,
        payload: &UpdateTeamMemberDto,
    ) -> Result<TeamMemberDto, ApiError> {
        let member = self.client.update_team_member(id, payload).await?;
        self.refresh().await?;
        Ok(member)
    }

    pub async fn remove_member(&self, id: i32) -> Result<(), ApiError> {
        self.client.delete_team_member(id).await?;
        self.refresh().await?;
        Ok(())
    }

    pub async fn add_staff(&self, payload: &CreateTeamStaffDto) -> Result<TeamStaffDto, ApiError> {
        let staff = self.client.create_team_staff(payload).await?;
        self.refresh().await?;
        Ok(staff)
    }

    pub async fn update_staff(
        &self,
        id: i32,
        payload: &UpdateTeamStaffDto,
    ) -> Result<TeamStaffDto, ApiError> {
        let staff = self.client.update_team_staff(id, payload).await?;
        self.refresh().await?;
        Ok(staff)
    }

    pub async fn remove_staff(&self, id: i32) -> Result<(), ApiError> {
        self.client.delete_team_staff(id).await?;
        self.refresh().await?;
        Ok(())
    }
}
