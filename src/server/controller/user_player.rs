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
        user_player::{CreateUserPlayerDto, UpdateUserPlayerDto, UserPlayerDto},
    },
    server::{
        error::AppError,
        extract::AppJson,
        middleware::auth::AuthGuard,
        model::user_player::{CreateUserPlayerParams, UpdateUserPlayerParams, UserPlayerWithCount},
        service::user_player::UserPlayerService,
        state::AppState,
    },
};

/// Tag for grouping user player endpoints in OpenAPI documentation
pub static USER_PLAYER_TAG: &str = "user_player";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPlayerListParams {
    #[serde(default)]
    pub include_banned: bool,
}

/// Players owned by the caller with their participation counts.
///
/// Players under an active ban are hidden unless `includeBanned=true`.
#[utoipa::path(
    get,
    path = "/api/user_player",
    tag = USER_PLAYER_TAG,
    params(
        ("includeBanned" = Option<bool>, Query, description = "Include banned players")
    ),
    responses(
        (status = 200, description = "The caller's players", body = Vec<UserPlayerDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_user_players(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<UserPlayerListParams>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let players = UserPlayerService::new(&state.db)
        .list(&actor, params.include_banned)
        .await?;
    let dto: Vec<UserPlayerDto> = players
        .into_iter()
        .map(UserPlayerWithCount::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}

#[utoipa::path(
    post,
    path = "/api/user_player",
    tag = USER_PLAYER_TAG,
    request_body = CreateUserPlayerDto,
    responses(
        (status = 201, description = "Player created", body = UserPlayerDto),
        (status = 400, description = "Invalid player data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user_player(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<CreateUserPlayerDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = CreateUserPlayerParams::from_dto(actor.id, payload)?;
    let player = UserPlayerService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(player.into_dto())))
}

/// Edits one of the caller's players, including its ban state.
#[utoipa::path(
    put,
    path = "/api/user_player/{id}",
    tag = USER_PLAYER_TAG,
    params(
        ("id" = i32, Path, description = "User player ID")
    ),
    request_body = UpdateUserPlayerDto,
    responses(
        (status = 200, description = "Player updated", body = UserPlayerDto),
        (status = 400, description = "Invalid player data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Player not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user_player(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateUserPlayerDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = UpdateUserPlayerParams::from_dto(payload)?;
    let player = UserPlayerService::new(&state.db)
        .update(&actor, id, params)
        .await?;

    Ok((StatusCode::OK, Json(player.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/user_player/{id}",
    tag = USER_PLAYER_TAG,
    params(
        ("id" = i32, Path, description = "User player ID")
    ),
    responses(
        (status = 200, description = "Player deleted", body = SuccessDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Player not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user_player(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    UserPlayerService::new(&state.db).delete(&actor, id).await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("選手已成功刪除"))))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_user_players, create_user_player))
        .routes(routes!(update_user_player, delete_user_player))
}
