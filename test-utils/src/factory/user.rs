//! User factory for creating test user entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::user::UserRole;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let admin = UserFactory::new(&db).role(UserRole::Admin).build().await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    name: String,
    role: UserRole,
    password_hash: Option<String>,
    banned: bool,
    ban_expires: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - email: `"user{id}@example.com"`
    /// - name: `"User {id}"`
    /// - role: `UserRole::User`
    /// - no password, not banned
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("user{}@example.com", id),
            name: format!("User {}", id),
            role: UserRole::User,
            password_hash: None,
            banned: false,
            ban_expires: None,
            created_at: Utc::now(),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Shorthand for `role(UserRole::Admin)`.
    pub fn admin(self) -> Self {
        self.role(UserRole::Admin)
    }

    /// Shorthand for `role(UserRole::Owner)`.
    pub fn owner(self) -> Self {
        self.role(UserRole::Owner)
    }

    /// Stores an already hashed password.
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Bans the user, optionally until `expires`.
    pub fn banned(mut self, expires: Option<DateTime<Utc>>) -> Self {
        self.banned = true;
        self.ban_expires = expires;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the user entity into the database.
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            email: ActiveValue::Set(self.email),
            name: ActiveValue::Set(self.name),
            username: ActiveValue::Set(None),
            role: ActiveValue::Set(self.role),
            password_hash: ActiveValue::Set(self.password_hash),
            banned: ActiveValue::Set(self.banned),
            ban_reason: ActiveValue::Set(self.banned.then(|| "Test ban".to_string())),
            ban_expires: ActiveValue::Set(self.ban_expires),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a regular user with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates an admin user with default values.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).admin().build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_user_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;

        assert_eq!(user.role, UserRole::User);
        assert!(user.email.ends_with("@example.com"));
        assert!(!user.banned);
        assert!(user.password_hash.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_banned_admin() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = UserFactory::new(db).admin().banned(None).build().await?;

        assert_eq!(user.role, UserRole::Admin);
        assert!(user.is_banned_at(Utc::now()));

        Ok(())
    }
}
