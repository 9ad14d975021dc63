use serde::Serialize;

use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::activity_log::PaginatedActivityLogsDto,
};

/// Filters for the activity log search. Dates accept any format the server parses.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl ApiClient {
    pub async fn list_activity_logs(
        &self,
        query: &ActivityLogQuery,
    ) -> Result<PaginatedActivityLogsDto, ApiError> {
        fetch(self.get("/api/activity_log")?.query(query)).await
    }
}
