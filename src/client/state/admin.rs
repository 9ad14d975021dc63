use std::sync::Mutex;

use crate::{
    client::{
        api::{ActivityLogQuery, ApiClient, UserListQuery},
        model::error::ApiError,
        state::Query,
    },
    model::{
        activity_log::PaginatedActivityLogsDto,
        user::{PaginatedUsersDto, StatsDto, UserDto},
    },
};

/// Admin user list. Mutations re-run the last list query.
pub struct UserManagementState {
    client: ApiClient,
    last_query: Mutex<UserListQuery>,
    pub users: Query<PaginatedUsersDto>,
}

impl UserManagementState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            last_query: Mutex::new(UserListQuery::default()),
            users: Query::new(),
        }
    }

    pub async fn list_users(&self, query: UserListQuery) -> Result<PaginatedUsersDto, ApiError> {
        if let Ok(mut last) = self.last_query.lock() {
            *last = query;
        }
        self.refresh().await
    }

    pub async fn refresh(&self) -> Result<PaginatedUsersDto, ApiError> {
        let query = self
            .last_query
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default();
        self.users.run(|| self.client.list_users(&query)).await
    }

    pub async fn set_role(&self, id: i32, role: &str) -> Result<UserDto, ApiError> {
        let user = self.client.set_user_role(id, role).await?;
        self.refresh().await?;
        Ok(user)
    }

    pub async fn ban(
        &self,
        id: i32,
        reason: Option<String>,
        expires_in: Option<i64>,
    ) -> Result<UserDto, ApiError> {
        let user = self.client.ban_user(id, reason, expires_in).await?;
        self.refresh().await?;
        Ok(user)
    }

    pub async fn unban(&self, id: i32) -> Result<UserDto, ApiError> {
        let user = self.client.unban_user(id).await?;
        self.refresh().await?;
        Ok(user)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        self.client.delete_user(id).await?;
        self.refresh().await?;
        Ok(())
    }
}

pub struct DashboardStatsState {
    client: ApiClient,
    pub stats: Query<StatsDto>,
}

impl DashboardStatsState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            stats: Query::new(),
        }
    }

    pub async fn refresh(&self) -> Result<StatsDto, ApiError> {
        self.stats.run(|| self.client.get_stats()).await
    }
}

pub struct ActivityLogState {
    client: ApiClient,
    pub logs: Query<PaginatedActivityLogsDto>,
}

impl ActivityLogState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            logs: Query::new(),
        }
    }

    pub async fn search(&self, query: &ActivityLogQuery) -> Result<PaginatedActivityLogsDto, ApiError> {
        self.logs
            .run(|| self.client.list_activity_logs(query))
            .await
    }
}
