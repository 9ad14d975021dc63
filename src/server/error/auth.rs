use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id is stored in the session.
    ///
    /// Results in 401 Unauthorized.
    #[error("User not found in session")]
    UserNotInSession,

    /// No user id in the session while calling an admin-only route.
    ///
    /// Results in 401 Unauthorized.
    #[error("Admin route called without session")]
    AdminNotInSession,

    /// No user id in the session while calling a user administration route.
    ///
    /// Results in 401 Unauthorized with the user administration message.
    #[error("User administration route called without session")]
    UserAdminNotInSession,

    /// The session references a user that no longer exists.
    ///
    /// Happens after an account is deleted while its session is still alive. Results in
    /// 401 Unauthorized.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// The user's ban is in effect.
    ///
    /// Results in 403 Forbidden.
    #[error("User {0} is banned")]
    UserBanned(i32),

    /// The user lacks a permission required by the route.
    ///
    /// Results in 403 Forbidden; the reason is only logged.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// The user is not allowed on the user administration routes.
    ///
    /// Results in 403 Forbidden with the user administration message.
    #[error("User {0} denied user administration access")]
    UserAdminDenied(i32),

    /// Email or password did not match during sign-in.
    ///
    /// Results in 401 Unauthorized.
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` → 401 "請先登入"
/// - `AdminNotInSession` → 401 "未授權"
/// - `UserAdminNotInSession` → 401 "Unauthorized - No session"
/// - `InvalidCredentials` → 401 "Invalid email or password"
/// - `UserBanned` → 403 "Your account has been banned"
/// - `AccessDenied` → 403 "權限不足"
/// - `UserAdminDenied` → 403 "Forbidden - Insufficient permissions"
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                error_response(StatusCode::UNAUTHORIZED, "請先登入")
            }
            Self::AdminNotInSession => error_response(StatusCode::UNAUTHORIZED, "未授權"),
            Self::UserAdminNotInSession => {
                error_response(StatusCode::UNAUTHORIZED, "Unauthorized - No session")
            }
            Self::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            Self::UserBanned(_) => {
                error_response(StatusCode::FORBIDDEN, "Your account has been banned")
            }
            Self::AccessDenied(_, _) => error_response(StatusCode::FORBIDDEN, "權限不足"),
            Self::UserAdminDenied(_) => error_response(
                StatusCode::FORBIDDEN,
                "Forbidden - Insufficient permissions",
            ),
        }
    }
}
