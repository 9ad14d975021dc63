use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        game::{GameDetailDto, GameFeeDto, GameListItemDto, GameWithDetailsDto, UpsertGameDto},
    },
    server::{
        error::AppError,
        extract::AppJson,
        middleware::auth::{AuthGuard, Permission},
        model::{
            activity_log::ClientInfo,
            game::{detail_into_dto, fee_into_dto, UpsertGameParams},
        },
        service::game::GameService,
        state::AppState,
    },
};

/// Tag for grouping game endpoints in OpenAPI documentation
pub static GAME_TAG: &str = "game";

#[derive(Deserialize)]
pub struct GameListParams {
    pub region: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFeeParams {
    pub game_id: Option<i32>,
    pub category_id: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameIdParams {
    pub game_id: Option<i32>,
}

impl GameIdParams {
    /// The `gameId` query value, required by the per-game listings.
    pub fn require(&self) -> Result<i32, AppError> {
        self.game_id
            .ok_or_else(|| AppError::BadRequest("缺少必要欄位: gameId".to_string()))
    }
}

/// Lists games, newest first.
///
/// Public. Each game carries its registration and category counts and the status derived
/// from the current time.
///
/// # Arguments
/// - `params` - Optional `region` code to filter on
///
/// # Returns
/// - `200 OK` - Games matching the filter
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/games",
    tag = GAME_TAG,
    params(
        ("region" = Option<String>, Query, description = "Region code, e.g. taipei")
    ),
    responses(
        (status = 200, description = "Games", body = Vec<GameListItemDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<GameListParams>,
) -> Result<impl IntoResponse, AppError> {
    let region = params.region.filter(|r| !r.trim().is_empty());
    let games = GameService::new(&state.db).list(region.as_deref()).await?;

    let now = Utc::now();
    let dto: Vec<GameListItemDto> = games.into_iter().map(|g| g.into_dto(now)).collect();

    Ok((StatusCode::OK, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/api/games/{id}",
    tag = GAME_TAG,
    params(
        ("id" = i32, Path, description = "Game ID")
    ),
    responses(
        (status = 200, description = "Game with detail, categories and fees", body = GameWithDetailsDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let game = GameService::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("找不到此比賽".to_string()))?;

    Ok((StatusCode::OK, Json(game.into_dto(Utc::now()))))
}

/// Creates a game together with its detail, categories and fees.
///
/// # Access Control
/// - `Admin` - Only admins can create games
///
/// # Returns
/// - `201 Created` - The created game with nested rows
/// - `400 Bad Request` - Missing field, bad date, window order or fee error
/// - `401 Unauthorized` / `403 Forbidden` - Not signed in or not an admin
#[utoipa::path(
    post,
    path = "/api/games",
    tag = GAME_TAG,
    request_body = UpsertGameDto,
    responses(
        (status = 201, description = "Game created", body = GameWithDetailsDto),
        (status = 400, description = "Invalid game data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_game(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    AppJson(payload): AppJson<UpsertGameDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = UpsertGameParams::from_dto(payload)?;
    let game = GameService::new(&state.db)
        .create(&actor, params, &client)
        .await?;

    Ok((StatusCode::CREATED, Json(game.into_dto(Utc::now()))))
}

/// Updates a game. Supplying `categories` replaces categories and fees.
///
/// # Access Control
/// - `Admin` - Only admins can update games
///
/// # Returns
/// - `200 OK` - The updated game
/// - `400 Bad Request` - Invalid data, or categories supplied while registrations exist
/// - `404 Not Found` - No such game
#[utoipa::path(
    put,
    path = "/api/games/{id}",
    tag = GAME_TAG,
    params(
        ("id" = i32, Path, description = "Game ID")
    ),
    request_body = UpsertGameDto,
    responses(
        (status = 200, description = "Game updated", body = GameWithDetailsDto),
        (status = 400, description = "Invalid game data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_game(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpsertGameDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = UpsertGameParams::from_dto(payload)?;
    let game = GameService::new(&state.db)
        .update(&actor, id, params, &client)
        .await?;

    Ok((StatusCode::OK, Json(game.into_dto(Utc::now()))))
}

#[utoipa::path(
    delete,
    path = "/api/games/{id}",
    tag = GAME_TAG,
    params(
        ("id" = i32, Path, description = "Game ID")
    ),
    responses(
        (status = 200, description = "Game deleted", body = SuccessDto),
        (status = 400, description = "Registrations exist", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_game(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    GameService::new(&state.db)
        .delete(&actor, id, &client)
        .await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("賽事已成功刪除"))))
}

/// Fees of a game, optionally narrowed to one category. Public.
#[utoipa::path(
    get,
    path = "/api/game_fee",
    tag = GAME_TAG,
    params(
        ("gameId" = Option<i32>, Query, description = "Game ID"),
        ("categoryId" = Option<i32>, Query, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Fees", body = Vec<GameFeeDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_game_fees(
    State(state): State<AppState>,
    Query(params): Query<GameFeeParams>,
) -> Result<impl IntoResponse, AppError> {
    let fees = GameService::new(&state.db)
        .fees(params.game_id, params.category_id)
        .await?;

    let dto: Vec<GameFeeDto> = fees.into_iter().map(fee_into_dto).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Detail row of a game, or `null` when the game has none. Public.
#[utoipa::path(
    get,
    path = "/api/game_detail",
    tag = GAME_TAG,
    params(
        ("gameId" = i32, Query, description = "Game ID")
    ),
    responses(
        (status = 200, description = "Detail row", body = Option<GameDetailDto>),
        (status = 400, description = "Missing gameId", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_game_detail(
    State(state): State<AppState>,
    Query(params): Query<GameIdParams>,
) -> Result<impl IntoResponse, AppError> {
    let detail = GameService::new(&state.db)
        .detail(params.require()?)
        .await?;

    Ok((StatusCode::OK, Json(detail.map(detail_into_dto))))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_games, create_game))
        .routes(routes!(get_game, update_game, delete_game))
        .routes(routes!(list_game_fees))
        .routes(routes!(get_game_detail))
}
