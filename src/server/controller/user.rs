use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        user::{ChangePasswordDto, HasCredentialDto, SetPasswordDto},
    },
    server::{
        error::AppError, extract::AppJson, middleware::auth::AuthGuard,
        service::account::AccountService, state::AppState,
    },
};

/// Tag for grouping account self-service endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Changes the password of the signed-in user.
///
/// # Access Control
/// - Signed-in user
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Current password wrong or new password out of bounds
/// - `401 Unauthorized` - Not signed in
#[utoipa::path(
    post,
    path = "/api/user/change-password",
    tag = USER_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = SuccessDto),
        (status = 400, description = "Invalid password", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    AccountService::new(&state.db)
        .change_password(user, payload)
        .await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("密碼已更新"))))
}

/// Sets a first password on an account created without one.
#[utoipa::path(
    post,
    path = "/api/user/set-password",
    tag = USER_TAG,
    request_body = SetPasswordDto,
    responses(
        (status = 200, description = "Password set", body = SuccessDto),
        (status = 400, description = "Password already set or invalid", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_password(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<SetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    AccountService::new(&state.db)
        .set_password(user, payload)
        .await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("密碼已設定"))))
}

#[utoipa::path(
    get,
    path = "/api/user/has-credential",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Whether a password is set", body = HasCredentialDto),
        (status = 401, description = "Not signed in", body = ErrorDto)
    ),
)]
pub async fn has_credential(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((
        StatusCode::OK,
        Json(HasCredentialDto {
            has_credential: user.password_hash.is_some(),
        }),
    ))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(change_password))
        .routes(routes!(set_password))
        .routes(routes!(has_credential))
}
