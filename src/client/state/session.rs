use crate::{
    client::{api::ApiClient, model::error::ApiError, state::Query},
    model::user::{SignUpDto, UserDto},
};

/// The signed-in user.
pub struct SessionState {
    client: ApiClient,
    pub user: Query<UserDto>,
}

impl SessionState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            user: Query::new(),
        }
    }

    /// Loads the session. A 401 means signed out and clears the user instead of failing.
    pub async fn refresh(&self) -> Result<Option<UserDto>, ApiError> {
        match self.user.run(|| self.client.get_session()).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_unauthorized() => {
                self.user.clear();
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserDto, ApiError> {
        self.user
            .run(|| self.client.sign_in(email, password))
            .await
    }

    pub async fn sign_up(&self, payload: &SignUpDto) -> Result<UserDto, ApiError> {
        self.user.run(|| self.client.sign_up(payload)).await
    }

    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.client.sign_out().await?;
        self.user.clear();
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .data()
            .map(|user| user.role.is_admin())
            .unwrap_or(false)
    }
}
