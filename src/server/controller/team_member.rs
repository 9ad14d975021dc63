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
        team::{
            BatchCreateTeamMembersDto, CreateTeamMemberDto, TeamMemberDto, UpdateTeamMemberDto,
        },
    },
    server::{
        error::AppError,
        extract::AppJson,
        middleware::auth::AuthGuard,
        model::team::{member_into_dto, TeamMemberParams, UpdateTeamMemberParams},
        service::team_member::TeamMemberService,
        state::AppState,
    },
};

/// Tag for grouping team member endpoints in OpenAPI documentation
pub static TEAM_MEMBER_TAG: &str = "team_member";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamIdParams {
    pub team_id: Option<i32>,
}

impl TeamIdParams {
    pub fn require(&self) -> Result<i32, AppError> {
        self.team_id
            .ok_or_else(|| AppError::BadRequest("缺少必要欄位: teamId".to_string()))
    }
}

/// Every member of one of the caller's teams, banned members included.
#[utoipa::path(
    get,
    path = "/api/team_member",
    tag = TEAM_MEMBER_TAG,
    params(
        ("teamId" = i32, Query, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team members", body = Vec<TeamMemberDto>),
        (status = 400, description = "Missing teamId", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Team owned by another user", body = ErrorDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_team_members(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TeamIdParams>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let members = TeamMemberService::new(&state.db)
        .list(&actor, params.require()?)
        .await?;
    let dto: Vec<TeamMemberDto> = members.into_iter().map(member_into_dto).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Adds a member to one of the caller's teams.
///
/// # Returns
/// - `201 Created` - The new member
/// - `400 Bad Request` - First invalid field
/// - `403 Forbidden` - Team owned by another user
/// - `404 Not Found` - No such team
#[utoipa::path(
    post,
    path = "/api/team_member",
    tag = TEAM_MEMBER_TAG,
    request_body = CreateTeamMemberDto,
    responses(
        (status = 201, description = "Member created", body = TeamMemberDto),
        (status = 400, description = "Invalid member data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Team owned by another user", body = ErrorDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_team_member(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<CreateTeamMemberDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = TeamMemberParams::from_dto(payload.member)?;
    let member = TeamMemberService::new(&state.db)
        .create(&actor, payload.team_id, params)
        .await?;

    Ok((StatusCode::CREATED, Json(member_into_dto(member))))
}

/// Adds several members at once; one invalid entry rejects the whole batch.
#[utoipa::path(
    post,
    path = "/api/team_member/batch",
    tag = TEAM_MEMBER_TAG,
    request_body = BatchCreateTeamMembersDto,
    responses(
        (status = 201, description = "Members created", body = Vec<TeamMemberDto>),
        (status = 400, description = "Invalid member data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Team owned by another user", body = ErrorDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_team_members_batch(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<BatchCreateTeamMembersDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let members = payload
        .members
        .into_iter()
        .map(TeamMemberParams::from_dto)
        .collect::<Result<Vec<_>, _>>()?;
    let created = TeamMemberService::new(&state.db)
        .create_batch(&actor, payload.team_id, members)
        .await?;
    let dto: Vec<TeamMemberDto> = created.into_iter().map(member_into_dto).collect();

    Ok((StatusCode::CREATED, Json(dto)))
}

/// Edits a member; ban fields are accepted here as well.
#[utoipa::path(
    put,
    path = "/api/team_member/{id}",
    tag = TEAM_MEMBER_TAG,
    params(
        ("id" = i32, Path, description = "Team member ID")
    ),
    request_body = UpdateTeamMemberDto,
    responses(
        (status = 200, description = "Member updated", body = TeamMemberDto),
        (status = 400, description = "Invalid member data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Team owned by another user", body = ErrorDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_team_member(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateTeamMemberDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = UpdateTeamMemberParams::from_dto(payload)?;
    let member = TeamMemberService::new(&state.db)
        .update(&actor, id, params)
        .await?;

    Ok((StatusCode::OK, Json(member_into_dto(member))))
}

#[utoipa::path(
    delete,
    path = "/api/team_member/{id}",
    tag = TEAM_MEMBER_TAG,
    params(
        ("id" = i32, Path, description = "Team member ID")
    ),
    responses(
        (status = 200, description = "Member deleted", body = SuccessDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Team owned by another user", body = ErrorDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_team_member(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    TeamMemberService::new(&state.db).delete(&actor, id).await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("成員已成功刪除"))))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_team_members, create_team_member))
        .routes(routes!(create_team_members_batch))
        .routes(routes!(update_team_member, delete_team_member))
}
