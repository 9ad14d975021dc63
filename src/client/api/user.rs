use crate::{
    client::{
        api::{helper::fetch, ApiClient},
        model::error::ApiError,
    },
    model::{
        api::SuccessDto,
        user::{ChangePasswordDto, HasCredentialDto, SetPasswordDto},
    },
};

impl ApiClient {
    pub async fn change_password(&self, payload: &ChangePasswordDto) -> Result<SuccessDto, ApiError> {
        fetch(self.post("/api/user/change-password")?.json(payload)).await
    }

    pub async fn set_password(&self, payload: &SetPasswordDto) -> Result<SuccessDto, ApiError> {
        fetch(self.post("/api/user/set-password")?.json(payload)).await
    }

    pub async fn has_credential(&self) -> Result<bool, ApiError> {
        let dto: HasCredentialDto = fetch(self.get("/api/user/has-credential")?).await?;
        Ok(dto.has_credential)
    }
}
