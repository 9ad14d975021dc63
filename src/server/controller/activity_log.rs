use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{activity_log::PaginatedActivityLogsDto, api::ErrorDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::activity_log::ActivityLogFilter,
        service::activity_log::ActivityLogService,
        state::AppState,
        util::date::parse_datetime,
    },
};

/// Tag for grouping activity log endpoints in OpenAPI documentation
pub static ACTIVITY_LOG_TAG: &str = "activity_log";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogParams {
    pub action: Option<String>,
    pub entity: Option<String>,
    pub user_id: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ActivityLogParams {
    fn into_filter(self) -> Result<ActivityLogFilter, AppError> {
        let date = |value: Option<String>| -> Result<_, AppError> {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| {
                    parse_datetime(&v)
                        .ok_or_else(|| AppError::BadRequest("日期格式不正確".to_string()))
                })
                .transpose()
        };

        Ok(ActivityLogFilter {
            action: self.action.filter(|v| !v.is_empty()),
            entity: self.entity.filter(|v| !v.is_empty()),
            user_id: self.user_id,
            start_date: date(self.start_date)?,
            end_date: date(self.end_date)?,
            limit: self.limit.unwrap_or(0),
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// Searches the activity log, newest first.
///
/// # Access Control
/// - `Admin` - Other signed-in users get 403 `權限不足`
///
/// # Arguments
/// - `params` - Filters on `action`, `entity`, `userId` and an inclusive
///   `startDate`/`endDate` range, paged with `limit` (default 50, max 200) and `offset`
///
/// # Returns
/// - `200 OK` - `{data, total, limit, offset}`
/// - `400 Bad Request` - Unparsable date
/// - `401 Unauthorized` - Not signed in
/// - `403 Forbidden` - Not an admin
#[utoipa::path(
    get,
    path = "/api/activity_log",
    tag = ACTIVITY_LOG_TAG,
    params(
        ("action" = Option<String>, Query, description = "Action name"),
        ("entity" = Option<String>, Query, description = "Entity name"),
        ("userId" = Option<i32>, Query, description = "Acting user"),
        ("startDate" = Option<String>, Query, description = "Inclusive lower bound"),
        ("endDate" = Option<String>, Query, description = "Inclusive upper bound"),
        ("limit" = Option<u64>, Query, description = "Page size (default: 50, max: 200)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip (default: 0)")
    ),
    responses(
        (status = 200, description = "Matching entries", body = PaginatedActivityLogsDto),
        (status = 400, description = "Invalid date", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_activity_logs(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ActivityLogParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    if !Permission::Admin.allows(&user) {
        return Err(AppError::Forbidden("權限不足".to_string()));
    }

    let logs = ActivityLogService::new(&state.db)
        .search(params.into_filter()?)
        .await?;

    Ok((StatusCode::OK, Json(logs.into_dto())))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_activity_logs))
}
