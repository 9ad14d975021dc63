use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        team::{TeamDto, TeamNameDto, TeamSummaryDto},
    },
    server::{
        error::AppError,
        extract::AppJson,
        middleware::auth::AuthGuard,
        model::team::{team_into_dto, TeamSummary},
        service::team::TeamService,
        state::AppState,
    },
};

/// Tag for grouping team endpoints in OpenAPI documentation
pub static TEAM_TAG: &str = "team";

/// Teams created by the caller with staff, active members and counts.
#[utoipa::path(
    get,
    path = "/api/team",
    tag = TEAM_TAG,
    responses(
        (status = 200, description = "The caller's teams", body = Vec<TeamSummaryDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_teams(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let teams = TeamService::new(&state.db).list(&actor).await?;
    let dto: Vec<TeamSummaryDto> = teams.into_iter().map(TeamSummary::into_dto).collect();

    Ok((StatusCode::OK, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/api/team/{id}",
    tag = TEAM_TAG,
    params(
        ("id" = i32, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team summary", body = TeamSummaryDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_team(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let team = TeamService::new(&state.db).get(&actor, id).await?;

    Ok((StatusCode::OK, Json(team.into_dto())))
}

/// Creates a team owned by the caller.
///
/// # Returns
/// - `201 Created` - The new team
/// - `400 Bad Request` - Name empty, too long or already taken
/// - `401 Unauthorized` - Not signed in
#[utoipa::path(
    post,
    path = "/api/team",
    tag = TEAM_TAG,
    request_body = TeamNameDto,
    responses(
        (status = 201, description = "Team created", body = TeamDto),
        (status = 400, description = "Invalid team name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_team(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<TeamNameDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let team = TeamService::new(&state.db)
        .create(&actor, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(team_into_dto(team))))
}

#[utoipa::path(
    put,
    path = "/api/team/{id}",
    tag = TEAM_TAG,
    params(
        ("id" = i32, Path, description = "Team ID")
    ),
    request_body = TeamNameDto,
    responses(
        (status = 200, description = "Team renamed", body = TeamDto),
        (status = 400, description = "Invalid team name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Team owned by another user", body = ErrorDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_team(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<TeamNameDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let team = TeamService::new(&state.db)
        .rename(&actor, id, &payload.name)
        .await?;

    Ok((StatusCode::OK, Json(team_into_dto(team))))
}

/// Deletes a team with its members, staff and registrations.
#[utoipa::path(
    delete,
    path = "/api/team/{id}",
    tag = TEAM_TAG,
    params(
        ("id" = i32, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team deleted", body = SuccessDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Team owned by another user", body = ErrorDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_team(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    TeamService::new(&state.db).delete(&actor, id).await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("隊伍已成功刪除"))))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_teams, create_team))
        .routes(routes!(get_team, update_team, delete_team))
}
