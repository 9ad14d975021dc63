use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserPlayerDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub ban_until: Option<DateTime<Utc>>,
    /// Number of registrations the player takes part in.
    pub participation_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPlayerDto {
    pub name: Option<String>,
    pub gender: Option<String>,
    /// `YYYY-MM-DD`
    pub birthday: Option<String>,
}

/// Partial update. Banning and unbanning go through `is_banned`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPlayerDto {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub is_banned: Option<bool>,
    pub ban_reason: Option<String>,
    pub ban_until: Option<DateTime<Utc>>,
}
