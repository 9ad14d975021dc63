use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogDto {
    pub id: i32,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<String>,
    pub user_id: Option<i32>,
    pub description: Option<String>,
    #[cfg_attr(feature = "server", schema(value_type = Option<Object>))]
    pub metadata: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaginatedActivityLogsDto {
    pub data: Vec<ActivityLogDto>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}
