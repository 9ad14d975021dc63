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
        api::ErrorDto,
        registration::{
            RegistrationActionDto, RegistrationDto, ResubmitDto, ReviewDto, SignupDto,
            SignupResponseDto,
        },
    },
    server::{
        error::AppError,
        extract::AppJson,
        middleware::auth::{AuthGuard, Permission},
        model::{
            activity_log::ClientInfo,
            registration::{
                parse_status, RegistrationWithParticipants, ResubmitParams, ReviewDecision,
                SignupParams,
            },
        },
        service::registration::RegistrationService,
        state::AppState,
    },
};

/// Tag for grouping registration endpoints in OpenAPI documentation
pub static REGISTRATION_TAG: &str = "registration";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationListParams {
    pub game_id: Option<i32>,
    pub status: Option<String>,
}

fn into_dtos(registrations: Vec<RegistrationWithParticipants>) -> Vec<RegistrationDto> {
    registrations
        .into_iter()
        .map(RegistrationWithParticipants::into_dto)
        .collect()
}

/// Signs up for one category of a game.
///
/// # Access Control
/// - Signed-in user; team entries require owning the team and players must be the
///   caller's own
///
/// # Arguments
/// - `id` - Game ID
/// - `payload` - Category, optional team, participants and note
///
/// # Returns
/// - `201 Created` - `{success, data}` with the pending registration
/// - `400 Bad Request` - Missing fields, closed window, duplicate team entry or ineligible
///   participants
/// - `401 Unauthorized` - Not signed in
/// - `403 Forbidden` - Team owned by someone else
/// - `404 Not Found` - Game, category or team missing
#[utoipa::path(
    post,
    path = "/api/games/{id}/signup",
    tag = REGISTRATION_TAG,
    params(
        ("id" = i32, Path, description = "Game ID")
    ),
    request_body = SignupDto,
    responses(
        (status = 201, description = "Registration submitted", body = SignupResponseDto),
        (status = 400, description = "Invalid signup", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Team owned by another user", body = ErrorDto),
        (status = 404, description = "Game, category or team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<SignupDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = SignupParams::from_dto(id, payload)?;
    let registration = RegistrationService::new(&state.db)
        .signup(&actor, params, Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponseDto {
            success: true,
            data: registration.into_dto(),
        }),
    ))
}

/// Every registration of a game, newest first.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/games/{id}/registrations",
    tag = REGISTRATION_TAG,
    params(
        ("id" = i32, Path, description = "Game ID")
    ),
    responses(
        (status = 200, description = "Registrations with participants", body = Vec<RegistrationDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_game_registrations(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let registrations = RegistrationService::new(&state.db)
        .list_for_game(id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(registrations))))
}

/// Registrations submitted by the caller.
#[utoipa::path(
    get,
    path = "/api/registration",
    tag = REGISTRATION_TAG,
    params(
        ("gameId" = Option<i32>, Query, description = "Only this game"),
        ("status" = Option<String>, Query, description = "pending, approved, confirmed or rejected")
    ),
    responses(
        (status = 200, description = "The caller's registrations", body = Vec<RegistrationDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_my_registrations(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RegistrationListParams>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let status = params.status.as_deref().map(parse_status).transpose()?;
    let registrations = RegistrationService::new(&state.db)
        .list_mine(&actor, params.game_id, status)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(registrations))))
}

#[utoipa::path(
    get,
    path = "/api/registration/{id}",
    tag = REGISTRATION_TAG,
    params(
        ("id" = i32, Path, description = "Registration ID")
    ),
    responses(
        (status = 200, description = "Registration with participants", body = RegistrationDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Registration not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_registration(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let registration = RegistrationService::new(&state.db)
        .get(&actor, id)
        .await?;

    Ok((StatusCode::OK, Json(registration.into_dto())))
}

/// Replaces the participants and note of the caller's registration.
///
/// A rejected registration goes back to pending. An omitted note clears the stored one.
///
/// # Returns
/// - `200 OK` - `{success, message, registration}`
/// - `400 Bad Request` - Registration locked, signup closed or ineligible participants
/// - `404 Not Found` - Missing or not the caller's registration
#[utoipa::path(
    put,
    path = "/api/registration/{id}",
    tag = REGISTRATION_TAG,
    params(
        ("id" = i32, Path, description = "Registration ID")
    ),
    request_body = ResubmitDto,
    responses(
        (status = 200, description = "Registration updated", body = RegistrationActionDto),
        (status = 400, description = "Registration cannot be changed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Registration not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resubmit_registration(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<ResubmitDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = ResubmitParams::from_dto(id, payload)?;
    let registration = RegistrationService::new(&state.db)
        .resubmit(&actor, params, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(RegistrationActionDto {
            success: true,
            message: "報名更新成功".to_string(),
            registration: registration.into_dto(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/registration/approve",
    tag = REGISTRATION_TAG,
    request_body = ReviewDto,
    responses(
        (status = 200, description = "Registration approved", body = RegistrationActionDto),
        (status = 400, description = "Missing registration ID", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Registration not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_registration(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    AppJson(payload): AppJson<ReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    review(state, session, client, payload, ReviewDecision::Approve).await
}

#[utoipa::path(
    post,
    path = "/api/registration/reject",
    tag = REGISTRATION_TAG,
    request_body = ReviewDto,
    responses(
        (status = 200, description = "Registration rejected", body = RegistrationActionDto),
        (status = 400, description = "Missing registration ID", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Registration not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_registration(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    AppJson(payload): AppJson<ReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    review(state, session, client, payload, ReviewDecision::Reject).await
}

async fn review(
    state: AppState,
    session: Session,
    client: ClientInfo,
    payload: ReviewDto,
    decision: ReviewDecision,
) -> Result<(StatusCode, Json<RegistrationActionDto>), AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let id = payload
        .id
        .ok_or_else(|| AppError::BadRequest("報名 ID 為必填項目".to_string()))?;
    let registration = RegistrationService::new(&state.db)
        .review(&actor, id, decision, &client)
        .await?;

    Ok((
        StatusCode::OK,
        Json(RegistrationActionDto {
            success: true,
            message: decision.message().to_string(),
            registration: registration.into_dto(),
        }),
    ))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(signup))
        .routes(routes!(list_game_registrations))
        .routes(routes!(list_my_registrations))
        .routes(routes!(get_registration, resubmit_registration))
        .routes(routes!(approve_registration))
        .routes(routes!(reject_registration))
}
