//! Authorization guard.
//!
//! Every protected handler calls `AuthGuard::require` with the permissions it needs. Services
//! that only learn the owner of a record after loading it use `Permission::allows` on the
//! user returned by the guard, so both paths share one predicate.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
};

/// A requirement a signed-in user must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Role is `admin` or `owner`.
    Admin,
    /// Role is `admin` or `owner`, on the `/api/admin` user administration routes. Failures
    /// carry that surface's own messages.
    UserAdmin,
    /// The user is the owner of a record whose owning user id is given.
    ResourceOwner(i32),
}

impl Permission {
    /// Whether `user` satisfies this permission.
    pub fn allows(&self, user: &entity::user::Model) -> bool {
        match self {
            Permission::Admin | Permission::UserAdmin => user.role.is_admin(),
            Permission::ResourceOwner(owner_id) => user.id == *owner_id,
        }
    }
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the signed-in user and checks `permissions` against it.
    ///
    /// Banned users are rejected even when no permission is requested.
    ///
    /// # Returns
    /// - `Ok(user)` - The signed-in user satisfies every permission
    /// - `Err(AuthError::UserNotInSession | AdminNotInSession | UserAdminNotInSession)` - No
    ///   session (401)
    /// - `Err(AuthError::UserNotInDatabase)` - Session points to a deleted user (401)
    /// - `Err(AuthError::UserBanned)` - Ban in effect (403)
    /// - `Err(AuthError::AccessDenied | UserAdminDenied)` - A permission is not satisfied (403)
    pub async fn require(
        &self,
        permissions: &[Permission],
    ) -> Result<entity::user::Model, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            if permissions.contains(&Permission::UserAdmin) {
                return Err(AuthError::UserAdminNotInSession.into());
            }
            if permissions.contains(&Permission::Admin) {
                return Err(AuthError::AdminNotInSession.into());
            }
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if user.is_banned_at(Utc::now()) {
            return Err(AuthError::UserBanned(user.id).into());
        }

        for permission in permissions {
            if !permission.allows(&user) {
                if *permission == Permission::UserAdmin {
                    return Err(AuthError::UserAdminDenied(user.id).into());
                }
                return Err(AuthError::AccessDenied(
                    user.id,
                    format!("missing permission {:?}", permission),
                )
                .into());
            }
        }

        Ok(user)
    }
}
