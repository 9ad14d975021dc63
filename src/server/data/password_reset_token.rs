use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

/// Repository for single-use password reset tokens.
pub struct PasswordResetTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PasswordResetTokenRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<entity::password_reset_token::Model, DbErr> {
        entity::password_reset_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            token: ActiveValue::Set(token),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Finds a token that has not expired at `now`.
    pub async fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<entity::password_reset_token::Model>, DbErr> {
        entity::prelude::PasswordResetToken::find()
            .filter(entity::password_reset_token::Column::Token.eq(token))
            .filter(entity::password_reset_token::Column::ExpiresAt.gt(now))
            .one(self.db)
            .await
    }

    /// Removes every token of a user, used once a reset succeeds.
    pub async fn delete_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::PasswordResetToken::delete_many()
            .filter(entity::password_reset_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::PasswordResetToken::delete_many()
            .filter(entity::password_reset_token::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    #[tokio::test]
    async fn expired_tokens_are_not_found_and_get_purged() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::create_user(db).await?;
        let repo = PasswordResetTokenRepository::new(db);
        let now = Utc::now();

        repo.create(user.id, "fresh".to_string(), now + Duration::hours(1))
            .await?;
        repo.create(user.id, "stale".to_string(), now - Duration::minutes(1))
            .await?;

        assert!(repo.find_valid("fresh", now).await?.is_some());
        assert!(repo.find_valid("stale", now).await?.is_none());

        assert_eq!(repo.delete_expired(now).await?, 1);
        assert_eq!(repo.delete_for_user(user.id).await?, 1);

        Ok(())
    }
}
