use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        game::{CreateGameCategoryDto, GameCategoryDto, UpdateGameCategoryDto},
    },
    server::{
        controller::game::GameIdParams,
        error::AppError,
        extract::AppJson,
        middleware::auth::{AuthGuard, Permission},
        model::{
            activity_log::ClientInfo,
            game::{category_into_dto, GameCategoryParams},
        },
        service::game_category::GameCategoryService,
        state::AppState,
    },
};

/// Tag for grouping game category endpoints in OpenAPI documentation
pub static GAME_CATEGORY_TAG: &str = "game_category";

#[utoipa::path(
    get,
    path = "/api/game_category",
    tag = GAME_CATEGORY_TAG,
    params(
        ("gameId" = i32, Query, description = "Game ID")
    ),
    responses(
        (status = 200, description = "Categories of the game", body = Vec<GameCategoryDto>),
        (status = 400, description = "Missing gameId", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_game_categories(
    State(state): State<AppState>,
    Query(params): Query<GameIdParams>,
) -> Result<impl IntoResponse, AppError> {
    let categories = GameCategoryService::new(&state.db)
        .list(params.require()?)
        .await?;

    let dto: Vec<GameCategoryDto> = categories.into_iter().map(category_into_dto).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Adds one category to an existing game.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The new category
/// - `400 Bad Request` - `gameId` or `categoryName` missing
/// - `404 Not Found` - No such game
#[utoipa::path(
    post,
    path = "/api/game_category",
    tag = GAME_CATEGORY_TAG,
    request_body = CreateGameCategoryDto,
    responses(
        (status = 201, description = "Category created", body = GameCategoryDto),
        (status = 400, description = "Missing field", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_game_category(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    AppJson(payload): AppJson<CreateGameCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = GameCategoryParams::from_dto(payload)?;
    let category = GameCategoryService::new(&state.db)
        .create(&actor, params, &client)
        .await?;

    Ok((StatusCode::CREATED, Json(category_into_dto(category))))
}

#[utoipa::path(
    put,
    path = "/api/game_category/{id}",
    tag = GAME_CATEGORY_TAG,
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateGameCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = GameCategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_game_category(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateGameCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let category = GameCategoryService::new(&state.db)
        .update(&actor, id, payload, &client)
        .await?;

    Ok((StatusCode::OK, Json(category_into_dto(category))))
}

#[utoipa::path(
    delete,
    path = "/api/game_category/{id}",
    tag = GAME_CATEGORY_TAG,
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = SuccessDto),
        (status = 400, description = "Registrations reference the category", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_game_category(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    GameCategoryService::new(&state.db)
        .delete(&actor, id, &client)
        .await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("分類已成功刪除"))))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_game_categories, create_game_category))
        .routes(routes!(update_game_category, delete_game_category))
}
