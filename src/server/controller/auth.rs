use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        user::{ForgotPasswordDto, ResetPasswordDto, SignInDto, SignUpDto, UserDto},
    },
    server::{
        error::AppError,
        extract::AppJson,
        middleware::{auth::AuthGuard, session::AuthSession},
        model::user::User,
        service::account::AccountService,
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Creates a credential account and signs it in.
///
/// # Returns
/// - `201 Created` - The new user; the session cookie is set
/// - `400 Bad Request` - Invalid email, name or password, or the email is taken
#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    tag = AUTH_TAG,
    request_body = SignUpDto,
    responses(
        (status = 201, description = "Account created and signed in", body = UserDto),
        (status = 400, description = "Invalid sign-up data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sign_up(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<SignUpDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AccountService::new(&state.db).sign_up(payload).await?;

    AuthSession::new(&session).set_user_id(user.id).await?;
    tracing::info!(user_id = user.id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(User::from_entity(user).into_dto()),
    ))
}

/// Signs in with email and password.
///
/// # Returns
/// - `200 OK` - The signed-in user
/// - `401 Unauthorized` - Unknown email or wrong password
/// - `403 Forbidden` - The account is banned
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    tag = AUTH_TAG,
    request_body = SignInDto,
    responses(
        (status = 200, description = "Signed in", body = UserDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 403, description = "Account banned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<SignInDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AccountService::new(&state.db).sign_in(payload).await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((StatusCode::OK, Json(User::from_entity(user).into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Session cleared", body = SuccessDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sign_out(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("Signed out"))))
}

/// Returns the signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "No session", body = ErrorDto),
        (status = 403, description = "Account banned", body = ErrorDto)
    ),
)]
pub async fn get_session(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(User::from_entity(user).into_dto())))
}

/// Starts a password reset.
///
/// The answer is the same whether or not the email is registered. For a registered email a
/// one-hour reset link is generated and written to the server log.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    responses(
        (status = 200, description = "Request accepted", body = SuccessDto),
        (status = 400, description = "Invalid email or redirect URL", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AccountService::new(&state.db)
        .forgot_password(
            &payload.email,
            payload.redirect_to.as_deref(),
            &state.app_url,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(
            "If the email is registered, you will receive a password reset link",
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password updated", body = SuccessDto),
        (status = 400, description = "Invalid or expired token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AccountService::new(&state.db)
        .reset_password(payload)
        .await?;

    Ok((StatusCode::OK, Json(SuccessDto::new("Password has been reset"))))
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(sign_up))
        .routes(routes!(sign_in))
        .routes(routes!(sign_out))
        .routes(routes!(get_session))
        .routes(routes!(forgot_password))
        .routes(routes!(reset_password))
}
