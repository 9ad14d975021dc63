use chrono::{TimeDelta, Utc};
use entity::user::UserRole;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        activity_log::{ClientInfo, CreateActivityLogParams},
        user::{PaginatedUsers, User, UserListQuery},
    },
    service::activity_log::ActivityLogService,
};

const DEFAULT_BAN_REASON: &str = "No reason provided";

pub struct AdminUserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminUserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, query: UserListQuery) -> Result<PaginatedUsers, AppError> {
        let (users, total) = UserRepository::new(self.db).search(&query).await?;

        Ok(PaginatedUsers {
            users: users.into_iter().map(User::from_entity).collect(),
            total,
            limit: query.limit,
            offset: query.offset,
        })
    }

    /// Changes a user's role to `user` or `admin`.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::BadRequest)` - Role is not `user` or `admin`
    /// - `Err(AppError::NotFound)` - No such user
    /// - `Err(AppError::Forbidden)` - Target is the owner
    pub async fn set_role(
        &self,
        actor: &entity::user::Model,
        user_id: i32,
        role: &str,
        client: &ClientInfo,
    ) -> Result<User, AppError> {
        let role = match role.trim() {
            "user" => UserRole::User,
            "admin" => UserRole::Admin,
            _ => return Err(AppError::BadRequest("Invalid role".to_string())),
        };

        let user_repo = UserRepository::new(self.db);
        let user = self.find_target(user_id).await?;
        if user.role == UserRole::Owner {
            return Err(AppError::Forbidden("Cannot modify owner role".to_string()));
        }

        let previous = user.role;
        let user = user_repo.set_role(user, role).await?;

        ActivityLogService::new(self.db)
            .record(
                CreateActivityLogParams::new("update_role", "user")
                    .entity_id(user.id)
                    .user_id(actor.id)
                    .description(format!("Changed role of {}", user.email))
                    .metadata(json!({
                        "from": format!("{:?}", previous).to_lowercase(),
                        "to": format!("{:?}", role).to_lowercase(),
                    }))
                    .client(client),
            )
            .await?;

        Ok(User::from_entity(user))
    }

    /// Bans a user, optionally for `expires_in_seconds`.
    pub async fn ban(
        &self,
        actor: &entity::user::Model,
        user_id: i32,
        reason: Option<String>,
        expires_in_seconds: Option<i64>,
        client: &ClientInfo,
    ) -> Result<User, AppError> {
        let user = self.find_target(user_id).await?;
        if user.role == UserRole::Owner {
            return Err(AppError::Forbidden("Cannot ban owner".to_string()));
        }

        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_BAN_REASON.to_string());
        let expires = match expires_in_seconds.filter(|seconds| *seconds > 0) {
            Some(seconds) => Some(
                TimeDelta::try_seconds(seconds)
                    .and_then(|delta| Utc::now().checked_add_signed(delta))
                    .ok_or_else(|| AppError::BadRequest("Invalid ban duration".to_string()))?,
            ),
            None => None,
        };

        let user = UserRepository::new(self.db)
            .ban(user, reason.clone(), expires)
            .await?;

        ActivityLogService::new(self.db)
            .record(
                CreateActivityLogParams::new("ban", "user")
                    .entity_id(user.id)
                    .user_id(actor.id)
                    .description(format!("Banned {}", user.email))
                    .metadata(json!({ "reason": reason, "expires": expires }))
                    .client(client),
            )
            .await?;

        Ok(User::from_entity(user))
    }

    pub async fn unban(
        &self,
        actor: &entity::user::Model,
        user_id: i32,
        client: &ClientInfo,
    ) -> Result<User, AppError> {
        let user = self.find_target(user_id).await?;
        let user = UserRepository::new(self.db).unban(user).await?;

        ActivityLogService::new(self.db)
            .record(
                CreateActivityLogParams::new("unban", "user")
                    .entity_id(user.id)
                    .user_id(actor.id)
                    .description(format!("Unbanned {}", user.email))
                    .client(client),
            )
            .await?;

        Ok(User::from_entity(user))
    }

    /// Deletes a user and everything that cascades from it.
    pub async fn delete(
        &self,
        actor: &entity::user::Model,
        user_id: i32,
        client: &ClientInfo,
    ) -> Result<(), AppError> {
        let user = self.find_target(user_id).await?;
        if user.role == UserRole::Owner {
            return Err(AppError::Forbidden("Cannot delete owner".to_string()));
        }
        if user.id == actor.id {
            return Err(AppError::BadRequest("Cannot delete yourself".to_string()));
        }

        UserRepository::new(self.db).delete(user.id).await?;

        ActivityLogService::new(self.db)
            .record(
                CreateActivityLogParams::new("delete", "user")
                    .entity_id(user.id)
                    .user_id(actor.id)
                    .description(format!("Deleted {}", user.email))
                    .metadata(json!({ "name": user.name, "email": user.email }))
                    .client(client),
            )
            .await?;

        Ok(())
    }

    async fn find_target(&self, user_id: i32) -> Result<entity::user::Model, AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, EntityTrait};
    use test_utils::{builder::TestBuilder, factory};

    use super::*;
    use crate::server::model::activity_log::ActivityLogFilter;

    /// Tests that the owner's role cannot be changed.
    ///
    /// Expected: Err(Forbidden) "Cannot modify owner role"
    #[tokio::test]
    async fn owner_role_is_immutable() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let admin = factory::user::create_admin(db).await?;
        let owner = factory::user::UserFactory::new(db).owner().build().await?;

        let err = AdminUserService::new(db)
            .set_role(&admin, owner.id, "user", &ClientInfo::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(err.to_string(), "Cannot modify owner role");

        Ok(())
    }

    /// Tests rejecting a role outside `user` / `admin`.
    ///
    /// Expected: Err(BadRequest) "Invalid role"
    #[tokio::test]
    async fn rejects_unknown_role() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let admin = factory::user::create_admin(db).await?;
        let user = factory::create_user(db).await?;

        let err = AdminUserService::new(db)
            .set_role(&admin, user.id, "owner", &ClientInfo::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid role");

        Ok(())
    }

    /// Tests that the owner cannot be deleted and an admin cannot delete themselves.
    ///
    /// Expected: Forbidden for the owner, BadRequest for self
    #[tokio::test]
    async fn delete_protects_owner_and_self() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = AdminUserService::new(db);

        let admin = factory::user::create_admin(db).await?;
        let owner = factory::user::UserFactory::new(db).owner().build().await?;

        let err = service
            .delete(&admin, owner.id, &ClientInfo::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot delete owner");

        let err = service
            .delete(&admin, admin.id, &ClientInfo::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot delete yourself");

        Ok(())
    }

    /// Tests banning with defaults and logging the action.
    ///
    /// Expected: Banned with the default reason, no expiry and one activity entry
    #[tokio::test]
    async fn ban_uses_default_reason_and_logs() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let admin = factory::user::create_admin(db).await?;
        let user = factory::create_user(db).await?;

        let banned = AdminUserService::new(db)
            .ban(&admin, user.id, None, None, &ClientInfo::default())
            .await
            .unwrap();

        assert!(banned.banned);
        assert_eq!(banned.ban_reason.as_deref(), Some(DEFAULT_BAN_REASON));
        assert!(banned.ban_expires.is_none());

        let logs = ActivityLogService::new(db)
            .search(ActivityLogFilter {
                action: Some("ban".to_string()),
                limit: ActivityLogFilter::DEFAULT_LIMIT,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(logs.total, 1);
        assert_eq!(logs.entries[0].user_id, Some(admin.id));

        Ok(())
    }

    /// Tests that the owner cannot be banned.
    ///
    /// Expected: Err(Forbidden) "Cannot ban owner"
    #[tokio::test]
    async fn owner_cannot_be_banned() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let admin = factory::user::create_admin(db).await?;
        let owner = factory::user::UserFactory::new(db).owner().build().await?;

        let err = AdminUserService::new(db)
            .ban(&admin, owner.id, None, Some(60), &ClientInfo::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Cannot ban owner");

        Ok(())
    }

    /// Tests that a ban duration past the representable date range is refused.
    ///
    /// Expected: Err(BadRequest) "Invalid ban duration" and the user left unbanned
    #[tokio::test]
    async fn rejects_out_of_range_ban_duration() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let admin = factory::user::create_admin(db).await?;
        let user = factory::create_user(db).await?;

        let err = AdminUserService::new(db)
            .ban(&admin, user.id, None, Some(i64::MAX), &ClientInfo::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Invalid ban duration");

        let stored = entity::prelude::User::find_by_id(user.id).one(db).await?.unwrap();
        assert!(!stored.banned);

        Ok(())
    }
}
