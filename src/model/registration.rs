use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatusDto {
    Pending,
    Approved,
    Confirmed,
    Rejected,
}

/// A participant reference. Exactly one of the two ids must be set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInputDto {
    pub user_player_id: Option<i32>,
    pub team_member_id: Option<i32>,
    #[serde(default)]
    pub is_main_player: bool,
}

impl ParticipantInputDto {
    pub fn player(user_player_id: i32, is_main_player: bool) -> Self {
        Self {
            user_player_id: Some(user_player_id),
            team_member_id: None,
            is_main_player,
        }
    }

    pub fn member(team_member_id: i32, is_main_player: bool) -> Self {
        Self {
            user_player_id: None,
            team_member_id: Some(team_member_id),
            is_main_player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SignupDto {
    pub category_id: Option<i32>,
    pub team_id: Option<i32>,
    #[serde(default)]
    pub participants: Vec<ParticipantInputDto>,
    pub note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResubmitDto {
    #[serde(default)]
    pub participants: Vec<ParticipantInputDto>,
    pub note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: i32,
    pub team_member_id: Option<i32>,
    pub user_player_id: Option<i32>,
    pub name: String,
    pub is_main_player: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDto {
    pub id: i32,
    pub game_id: i32,
    pub category_id: i32,
    pub team_id: Option<i32>,
    pub registrant_user_id: i32,
    pub status: RegistrationStatusDto,
    pub note: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SignupResponseDto {
    pub success: bool,
    pub data: RegistrationDto,
}

/// Response for review and resubmission.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RegistrationActionDto {
    pub success: bool,
    pub message: String,
    pub registration: RegistrationDto,
}
