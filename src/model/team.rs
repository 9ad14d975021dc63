use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Team with its staff, its active members and counts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TeamSummaryDto {
    #[serde(flatten)]
    pub team: TeamDto,
    pub staff: Vec<TeamStaffDto>,
    /// Members that are not currently banned.
    pub members: Vec<TeamMemberDto>,
    pub member_count: u64,
    pub registration_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TeamNameDto {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDto {
    pub id: i32,
    pub team_id: i32,
    pub name: String,
    pub role: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub line_id: Option<String>,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub ban_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Member fields shared by single and batch creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberInputDto {
    #[serde(default)]
    pub name: String,
    pub role: Option<String>,
    #[serde(default)]
    pub gender: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub birthday: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub line_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMemberDto {
    pub team_id: i32,
    #[serde(flatten)]
    pub member: TeamMemberInputDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateTeamMembersDto {
    pub team_id: i32,
    pub members: Vec<TeamMemberInputDto>,
}

/// Partial member update; absent fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamMemberDto {
    pub name: Option<String>,
    pub role: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub line_id: Option<String>,
    pub is_banned: Option<bool>,
    pub ban_reason: Option<String>,
    pub ban_until: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum StaffRoleDto {
    Leader,
    Coach,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TeamStaffDto {
    pub id: i32,
    pub team_id: i32,
    pub role: StaffRoleDto,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub line_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Staff creation payload; `role` is free text on the wire and checked server side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamStaffDto {
    pub team_id: Option<i32>,
    pub role: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub line_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamStaffDto {
    pub role: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub line_id: Option<String>,
}
