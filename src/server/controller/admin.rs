use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        user::{BanUserDto, PaginatedUsersDto, SetRoleDto, StatsDto, UserDto},
    },
    server::{
        error::AppError,
        extract::AppJson,
        middleware::auth::{AuthGuard, Permission},
        model::{activity_log::ClientInfo, user::UserListQuery},
        service::admin::{stats::StatsService, user::AdminUserService},
        state::AppState,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub search_value: Option<String>,
    pub search_field: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

/// Pages through users for the admin dashboard.
///
/// # Access Control
/// - `UserAdmin` - Admin or owner
///
/// # Arguments
/// - `params` - `limit` (default 10, max 100), `offset`, `searchValue` matched against
///   `searchField` (`name` or `email`), `sortBy` and `sortDirection`
///
/// # Returns
/// - `200 OK` - `{users, total, limit, offset}`
/// - `401 Unauthorized` - No session
/// - `403 Forbidden` - Not an admin
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(
        ("limit" = Option<u64>, Query, description = "Page size (default: 10, max: 100)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip (default: 0)"),
        ("searchValue" = Option<String>, Query, description = "Case-insensitive search text"),
        ("searchField" = Option<String>, Query, description = "name or email (default: email)"),
        ("sortBy" = Option<String>, Query, description = "createdAt, name or email"),
        ("sortDirection" = Option<String>, Query, description = "asc or desc")
    ),
    responses(
        (status = 200, description = "One page of users", body = PaginatedUsersDto),
        (status = 401, description = "No session", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::UserAdmin])
        .await?;

    let query = UserListQuery::from_params(
        params.limit,
        params.offset,
        params.search_value,
        params.search_field.as_deref(),
        params.sort_by.as_deref(),
        params.sort_direction.as_deref(),
    );
    let page = AdminUserService::new(&state.db).list(query).await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Sets a user's role to `user` or `admin`. The owner's role cannot change.
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/role",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = SetRoleDto,
    responses(
        (status = 200, description = "Role updated", body = UserDto),
        (status = 400, description = "Invalid role", body = ErrorDto),
        (status = 401, description = "No session", body = ErrorDto),
        (status = 403, description = "Insufficient permissions or target is the owner", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_user_role(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<SetRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::UserAdmin])
        .await?;

    let user = AdminUserService::new(&state.db)
        .set_role(&actor, id, &payload.role, &client)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Bans a user, optionally for a limited number of seconds.
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/ban",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = BanUserDto,
    responses(
        (status = 200, description = "User banned", body = UserDto),
        (status = 400, description = "Ban duration out of range", body = ErrorDto),
        (status = 401, description = "No session", body = ErrorDto),
        (status = 403, description = "Insufficient permissions or target is the owner", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn ban_user(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<BanUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::UserAdmin])
        .await?;

    let user = AdminUserService::new(&state.db)
        .ban(
            &actor,
            id,
            payload.ban_reason,
            payload.ban_expires_in,
            &client,
        )
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/unban",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User unbanned", body = UserDto),
        (status = 401, description = "No session", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unban_user(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::UserAdmin])
        .await?;

    let user = AdminUserService::new(&state.db)
        .unban(&actor, id, &client)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Deletes a user and everything they own. The owner and the caller cannot be deleted.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = SuccessDto),
        (status = 400, description = "Cannot delete yourself", body = ErrorDto),
        (status = 401, description = "No session", body = ErrorDto),
        (status = 403, description = "Insufficient permissions or target is the owner", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::UserAdmin])
        .await?;

    AdminUserService::new(&state.db)
        .delete(&actor, id, &client)
        .await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("User deleted"))))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Dashboard counters", body = StatsDto),
        (status = 401, description = "No session", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::UserAdmin])
        .await?;

    let stats = StatsService::new(&state.db).get().await?;

    Ok((StatusCode::OK, Json(stats)))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users))
        .routes(routes!(delete_user))
        .routes(routes!(set_user_role))
        .routes(routes!(ban_user))
        .routes(routes!(unban_user))
        .routes(routes!(get_stats))
}
