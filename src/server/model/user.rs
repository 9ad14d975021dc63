//! User domain models and parameters.
//!
//! Provides the account model shared by authentication and the admin dashboard, plus the
//! search and sort parameters used to page through users.

use chrono::{DateTime, Utc};
use entity::user::UserRole;

use crate::{
    model::user::{PaginatedUsersDto, RoleDto, UserDto},
    server::model::MAX_OFFSET,
};

/// Account as exposed outside the data layer. The password hash never leaves the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub username: Option<String>,
    pub role: UserRole,
    pub banned: bool,
    pub ban_reason: Option<String>,
    pub ban_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model, dropping the credential.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            username: entity.username,
            role: entity.role,
            banned: entity.banned,
            ban_reason: entity.ban_reason,
            ban_expires: entity.ban_expires,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            username: self.username,
            role: role_into_dto(self.role),
            banned: self.banned,
            ban_reason: self.ban_reason,
            ban_expires: self.ban_expires,
            created_at: self.created_at,
        }
    }
}

pub fn role_into_dto(role: UserRole) -> RoleDto {
    match role {
        UserRole::User => RoleDto::User,
        UserRole::Admin => RoleDto::Admin,
        UserRole::Owner => RoleDto::Owner,
    }
}

/// Parameters for inserting a new account.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub name: String,
    pub username: Option<String>,
    pub role: UserRole,
    /// `None` creates an account that must set a password through a reset link.
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSearchField {
    Name,
    #[default]
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortField {
    #[default]
    CreatedAt,
    Name,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Page request for the admin user list.
#[derive(Debug, Clone, PartialEq)]
pub struct UserListQuery {
    pub limit: u64,
    pub offset: u64,
    /// Case-insensitive substring matched against `search_field`.
    pub search_value: Option<String>,
    pub search_field: UserSearchField,
    pub sort_by: UserSortField,
    pub sort_direction: SortDirection,
}

impl UserListQuery {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;

    /// Builds a query from raw request parameters. Unknown field names fall back to the
    /// defaults, `limit` is clamped to `1..=MAX_LIMIT` and `offset` to what the database accepts.
    pub fn from_params(
        limit: Option<u64>,
        offset: Option<u64>,
        search_value: Option<String>,
        search_field: Option<&str>,
        sort_by: Option<&str>,
        sort_direction: Option<&str>,
    ) -> Self {
        let search_field = match search_field {
            Some("name") => UserSearchField::Name,
            _ => UserSearchField::Email,
        };
        let sort_by = match sort_by {
            Some("name") => UserSortField::Name,
            Some("email") => UserSortField::Email,
            _ => UserSortField::CreatedAt,
        };
        let sort_direction = match sort_direction {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };

        Self {
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0).min(MAX_OFFSET),
            search_value: search_value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            search_field,
            sort_by,
            sort_direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults_and_clamps() {
        let query = UserListQuery::from_params(Some(500), None, Some("  ".into()), None, None, None);

        assert_eq!(query.limit, UserListQuery::MAX_LIMIT);
        assert_eq!(query.offset, 0);
        assert_eq!(query.search_value, None);
        assert_eq!(query.search_field, UserSearchField::Email);
        assert_eq!(query.sort_by, UserSortField::CreatedAt);
        assert_eq!(query.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn list_query_caps_offset() {
        let query = UserListQuery::from_params(Some(0), Some(u64::MAX), None, None, None, None);

        assert_eq!(query.limit, 1);
        assert_eq!(query.offset, MAX_OFFSET);
    }

    #[test]
    fn list_query_reads_known_fields() {
        let query = UserListQuery::from_params(
            None,
            Some(20),
            Some("ann".into()),
            Some("name"),
            Some("email"),
            Some("asc"),
        );

        assert_eq!(query.limit, UserListQuery::DEFAULT_LIMIT);
        assert_eq!(query.offset, 20);
        assert_eq!(query.search_value.as_deref(), Some("ann"));
        assert_eq!(query.search_field, UserSearchField::Name);
        assert_eq!(query.sort_by, UserSortField::Email);
        assert_eq!(query.sort_direction, SortDirection::Asc);
    }
}
