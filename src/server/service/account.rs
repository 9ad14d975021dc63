//! Credential accounts: sign-up, sign-in, passwords and reset tokens.

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use url::Url;

use crate::{
    model::user::{ChangePasswordDto, ResetPasswordDto, SetPasswordDto, SignInDto, SignUpDto},
    server::{
        data::{password_reset_token::PasswordResetTokenRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::user::CreateUserParams,
        util::{
            password::{hash_password, verify_password},
            token::generate_token,
            validate,
        },
    },
};

/// Reset tokens stay valid for one hour.
pub const RESET_TOKEN_TTL_SECONDS: i64 = 3600;
const RESET_TOKEN_LENGTH: usize = 48;
const RESET_PATH: &str = "/accounts/reset-password";

pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a credential account with the `user` role.
    ///
    /// # Returns
    /// - `Ok(user)` - Account created
    /// - `Err(AppError::BadRequest)` - Invalid email, name or password, or the email is taken
    pub async fn sign_up(&self, dto: SignUpDto) -> Result<entity::user::Model, AppError> {
        let email = dto.email.trim().to_lowercase();
        if !validate::is_email(&email) {
            return Err(AppError::BadRequest("Invalid email".to_string()));
        }
        let name = validate::name(&dto.name, "Name is required", "Name is too long")?;
        validate::password(&dto.password)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::BadRequest("Email already registered".to_string()));
        }

        let password_hash = hash_password(&dto.password)?;
        let user = user_repo
            .create(CreateUserParams {
                email,
                name,
                username: validate::optional_text(dto.username),
                role: entity::user::UserRole::User,
                password_hash: Some(password_hash),
            })
            .await
            .map_err(|e| match e.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::BadRequest("Email already registered".to_string())
                }
                _ => e.into(),
            })?;

        tracing::info!("New account {} ({})", user.id, user.email);

        Ok(user)
    }

    /// Checks credentials.
    ///
    /// Unknown emails, accounts without a password and wrong passwords all produce the same
    /// error.
    pub async fn sign_in(&self, dto: SignInDto) -> Result<entity::user::Model, AppError> {
        let email = dto.email.trim().to_lowercase();
        let Some(user) = UserRepository::new(self.db).find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };
        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(&dto.password, hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }
        if user.is_banned_at(Utc::now()) {
            return Err(AuthError::UserBanned(user.id).into());
        }

        Ok(user)
    }

    pub async fn change_password(
        &self,
        user: entity::user::Model,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        if dto.current_password.is_empty() {
            return Err(AppError::BadRequest("請輸入目前密碼".to_string()));
        }
        validate::password(&dto.new_password)?;

        let matches = match user.password_hash.as_deref() {
            Some(hash) => verify_password(&dto.current_password, hash)?,
            None => false,
        };
        if !matches {
            return Err(AppError::BadRequest("目前密碼不正確".to_string()));
        }

        let hash = hash_password(&dto.new_password)?;
        UserRepository::new(self.db)
            .set_password_hash(user, hash)
            .await?;

        Ok(())
    }

    /// Sets the first password of an account that has none.
    pub async fn set_password(
        &self,
        user: entity::user::Model,
        dto: SetPasswordDto,
    ) -> Result<(), AppError> {
        validate::password(&dto.new_password)?;
        if user.password_hash.is_some() {
            return Err(AppError::BadRequest("已設定過密碼".to_string()));
        }

        let hash = hash_password(&dto.new_password)?;
        UserRepository::new(self.db)
            .set_password_hash(user, hash)
            .await?;

        Ok(())
    }

    /// Stores a reset token for the account with `email`, if any, and logs the link.
    ///
    /// Returns nothing either way so callers cannot probe which emails are registered.
    pub async fn forgot_password(
        &self,
        email: &str,
        redirect_to: Option<&str>,
        app_url: &str,
    ) -> Result<(), AppError> {
        let email = email.trim().to_lowercase();
        if !validate::is_email(&email) {
            return Err(AppError::BadRequest("Invalid request data".to_string()));
        }
        let base = match redirect_to {
            Some(redirect) => {
                let url = Url::parse(redirect)
                    .map_err(|_| AppError::BadRequest("Invalid request data".to_string()))?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(AppError::BadRequest("Invalid request data".to_string()));
                }
                url.to_string()
            }
            None => format!("{}{}", app_url, RESET_PATH),
        };

        let Some(user) = UserRepository::new(self.db).find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = self.issue_token(user.id).await?;
        tracing::info!("Password reset link for {}: {}", user.email, with_token(&base, &token));

        Ok(())
    }

    /// Issues a reset token for `user_id` and returns the link to the reset page.
    pub async fn issue_reset_link(&self, user_id: i32, app_url: &str) -> Result<String, AppError> {
        let token = self.issue_token(user_id).await?;
        Ok(with_token(&format!("{}{}", app_url, RESET_PATH), &token))
    }

    async fn issue_token(&self, user_id: i32) -> Result<String, AppError> {
        let token = generate_token(RESET_TOKEN_LENGTH);
        let expires_at = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECONDS);

        PasswordResetTokenRepository::new(self.db)
            .create(user_id, token.clone(), expires_at)
            .await?;

        Ok(token)
    }

    /// Sets a new password from a valid token and consumes every token of that user.
    pub async fn reset_password(&self, dto: ResetPasswordDto) -> Result<(), AppError> {
        validate::password(&dto.new_password)?;
        let invalid = || AppError::BadRequest("Invalid or expired token".to_string());

        let txn = self.db.begin().await?;

        let token_repo = PasswordResetTokenRepository::new(&txn);
        let token = token_repo
            .find_valid(&dto.token, Utc::now())
            .await?
            .ok_or_else(invalid)?;

        let user_repo = UserRepository::new(&txn);
        let user = user_repo
            .find_by_id(token.user_id)
            .await?
            .ok_or_else(invalid)?;

        let hash = hash_password(&dto.new_password)?;
        user_repo.set_password_hash(user, hash).await?;
        token_repo.delete_for_user(token.user_id).await?;

        txn.commit().await?;

        Ok(())
    }
}

fn with_token(base: &str, token: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}token={}", base, separator, token)
}
