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
        team::{CreateTeamStaffDto, TeamStaffDto, UpdateTeamStaffDto},
    },
    server::{
        error::AppError,
        extract::AppJson,
        middleware::auth::AuthGuard,
        model::team::{staff_into_dto, staff_role, CreateTeamStaffParams, UpdateTeamStaffParams},
        service::team_staff::TeamStaffService,
        state::AppState,
    },
};

/// Tag for grouping team staff endpoints in OpenAPI documentation
pub static TEAM_STAFF_TAG: &str = "team_staff";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStaffListParams {
    pub team_id: Option<i32>,
    pub role: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/team_staff",
    tag = TEAM_STAFF_TAG,
    params(
        ("teamId" = i32, Query, description = "Team ID"),
        ("role" = Option<String>, Query, description = "leader or coach")
    ),
    responses(
        (status = 200, description = "Team staff", body = Vec<TeamStaffDto>),
        (status = 400, description = "Missing teamId or unknown role", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Team owned by another user", body = ErrorDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_team_staff(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TeamStaffListParams>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let team_id = params
        .team_id
        .ok_or_else(|| AppError::BadRequest("缺少必要欄位: teamId".to_string()))?;
    let role = params.role.as_deref().map(staff_role).transpose()?;

    let staff = TeamStaffService::new(&state.db)
        .list(&actor, team_id, role)
        .await?;
    let dto: Vec<TeamStaffDto> = staff.into_iter().map(staff_into_dto).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Adds a leader or coach to one of the caller's teams.
///
/// # Returns
/// - `201 Created` - The new staff entry
/// - `400 Bad Request` - `teamId`, `role` or `name` missing, or an unknown role
/// - `403 Forbidden` - Team owned by another user
/// - `404 Not Found` - No such team
#[utoipa::path(
    post,
    path = "/api/team_staff",
    tag = TEAM_STAFF_TAG,
    request_body = CreateTeamStaffDto,
    responses(
        (status = 201, description = "Staff created", body = TeamStaffDto),
        (status = 400, description = "Invalid staff data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Team owned by another user", body = ErrorDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_team_staff(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<CreateTeamStaffDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = CreateTeamStaffParams::from_dto(payload)?;
    let staff = TeamStaffService::new(&state.db)
        .create(&actor, params)
        .await?;

    Ok((StatusCode::CREATED, Json(staff_into_dto(staff))))
}

#[utoipa::path(
    put,
    path = "/api/team_staff/{id}",
    tag = TEAM_STAFF_TAG,
    params(
        ("id" = i32, Path, description = "Team staff ID")
    ),
    request_body = UpdateTeamStaffDto,
    responses(
        (status = 200, description = "Staff updated", body = TeamStaffDto),
        (status = 400, description = "Invalid staff data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Staff not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_team_staff(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateTeamStaffDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = UpdateTeamStaffParams::from_dto(payload)?;
    let staff = TeamStaffService::new(&state.db)
        .update(&actor, id, params)
        .await?;

    Ok((StatusCode::OK, Json(staff_into_dto(staff))))
}

#[utoipa::path(
    delete,
    path = "/api/team_staff/{id}",
    tag = TEAM_STAFF_TAG,
    params(
        ("id" = i32, Path, description = "Team staff ID")
    ),
    responses(
        (status = 200, description = "Staff deleted", body = SuccessDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Staff not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_team_staff(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    TeamStaffService::new(&state.db).delete(&actor, id).await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("隊職員已成功刪除"))))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_team_staff, create_team_staff))
        .routes(routes!(update_team_staff, delete_team_staff))
}
