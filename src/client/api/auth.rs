use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::{
        api::SuccessDto,
        user::{ForgotPasswordDto, ResetPasswordDto, SignInDto, SignUpDto, UserDto},
    },
};

impl ApiClient {
    pub async fn sign_up(&self, payload: &SignUpDto) -> Result<UserDto, ApiError> {
        fetch(self.post("/api/auth/sign-up")?.json(payload)).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserDto, ApiError> {
        let payload = SignInDto {
            email: email.to_string(),
            password: password.to_string(),
        };
        fetch(self.post("/api/auth/sign-in")?.json(&payload)).await
    }

    pub async fn sign_out(&self) -> Result<SuccessDto, ApiError> {
        fetch(self.post("/api/auth/sign-out")?).await
    }

    /// The signed-in user. Fails with 401 without a session.
    pub async fn get_session(&self) -> Result<UserDto, ApiError> {
        fetch(self.get("/api/auth/session")?).await
    }

    pub async fn forgot_password(&self, payload: &ForgotPasswordDto) -> Result<SuccessDto, ApiError> {
        fetch(self.post("/api/auth/forgot-password")?.json(payload)).await
    }

    pub async fn reset_password(&self, payload: &ResetPasswordDto) -> Result<SuccessDto, ApiError> {
        fetch(self.post("/api/auth/reset-password")?.json(payload)).await
    }
}
