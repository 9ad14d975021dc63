//! Activity log domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::activity_log::{ActivityLogDto, PaginatedActivityLogsDto},
    server::model::MAX_OFFSET,
};

/// Request context recorded alongside an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Entry to append. `metadata` is serialized to text on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateActivityLogParams {
    pub action: String,
    pub entity: String,
    pub entity_id: Option<String>,
    pub user_id: Option<i32>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub client: ClientInfo,
}

impl CreateActivityLogParams {
    pub fn new(action: &str, entity: &str) -> Self {
        Self {
            action: action.to_string(),
            entity: entity.to_string(),
            entity_id: None,
            user_id: None,
            description: None,
            metadata: None,
            client: ClientInfo::default(),
        }
    }

    pub fn entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn user_id(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn client(mut self, client: &ClientInfo) -> Self {
        self.client = client.clone();
        self
    }
}

/// Listing filters. Date bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityLogFilter {
    pub action: Option<String>,
    pub entity: Option<String>,
    pub user_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Requested page size; read through `page_limit`.
    pub limit: u64,
    pub offset: u64,
}

impl ActivityLogFilter {
    pub const DEFAULT_LIMIT: u64 = 50;
    pub const MAX_LIMIT: u64 = 200;

    /// Page size to query. `0` falls back to `DEFAULT_LIMIT`; larger values are capped at
    /// `MAX_LIMIT`.
    pub fn page_limit(&self) -> u64 {
        match self.limit {
            0 => Self::DEFAULT_LIMIT,
            limit => limit.min(Self::MAX_LIMIT),
        }
    }

    pub fn page_offset(&self) -> u64 {
        self.offset.min(MAX_OFFSET)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedActivityLogs {
    pub entries: Vec<entity::activity_log::Model>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl PaginatedActivityLogs {
    /// Converts to a DTO. Metadata that is not valid JSON is passed through as a string.
    pub fn into_dto(self) -> PaginatedActivityLogsDto {
        PaginatedActivityLogsDto {
            data: self.entries.into_iter().map(entry_into_dto).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

fn entry_into_dto(entity: entity::activity_log::Model) -> ActivityLogDto {
    let metadata = entity.metadata.map(|raw| {
        serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw))
    });

    ActivityLogDto {
        id: entity.id,
        action: entity.action,
        entity: entity.entity,
        entity_id: entity.entity_id,
        user_id: entity.user_id,
        description: entity.description,
        metadata,
        ip_address: entity.ip_address,
        user_agent: entity.user_agent,
        created_at: entity.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_uses_default_page() {
        let filter = ActivityLogFilter::default();

        assert_eq!(filter.page_limit(), ActivityLogFilter::DEFAULT_LIMIT);
        assert_eq!(filter.page_offset(), 0);
    }

    #[test]
    fn oversized_paging_is_capped() {
        let filter = ActivityLogFilter {
            limit: u64::MAX,
            offset: u64::MAX,
            ..Default::default()
        };

        assert_eq!(filter.page_limit(), ActivityLogFilter::MAX_LIMIT);
        assert_eq!(filter.page_offset(), MAX_OFFSET);
    }
}
