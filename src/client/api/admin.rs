use serde::Serialize;

use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::{
        api::SuccessDto,
        user::{BanUserDto, PaginatedUsersDto, SetRoleDto, StatsDto, UserDto},
    },
};

/// Paging, search and sort options for the admin user list.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,
}

impl ApiClient {
    pub async fn list_users(&self, query: &UserListQuery) -> Result<PaginatedUsersDto, ApiError> {
        fetch(self.get("/api/admin/users")?.query(query)).await
    }

    pub async fn set_user_role(&self, id: i32, role: &str) -> Result<UserDto, ApiError> {
        let payload = SetRoleDto {
            role: role.to_string(),
        };
        fetch(self.put(&format!("/api/admin/users/{}/role", id))?.json(&payload)).await
    }

    /// Bans a user. `expires_in` is in seconds; `None` bans permanently.
    pub async fn ban_user(
        &self,
        id: i32,
        reason: Option<String>,
        expires_in: Option<i64>,
    ) -> Result<UserDto, ApiError> {
        let payload = BanUserDto {
            ban_reason: reason,
            ban_expires_in: expires_in,
        };
        fetch(self.post(&format!("/api/admin/users/{}/ban", id))?.json(&payload)).await
    }

    pub async fn unban_user(&self, id: i32) -> Result<UserDto, ApiError> {
        fetch(self.post(&format!("/api/admin/users/{}/unban", id))?).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<SuccessDto, ApiError> {
        fetch(self.delete(&format!("/api/admin/users/{}", id))?).await
    }

    pub async fn get_stats(&self) -> Result<StatsDto, ApiError> {
        fetch(self.get("/api/admin/stats")?).await
    }
}
