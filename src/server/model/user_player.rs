//! User player domain models and parameters.

use chrono::{DateTime, NaiveDate, Utc};
use entity::user_player::Gender;

use crate::{
    model::user_player::{CreateUserPlayerDto, UpdateUserPlayerDto, UserPlayerDto},
    server::{
        error::AppError,
        util::validate::{self, gender_code, optional_text},
    },
};

const GENDER_MESSAGE: &str = "性別必須是 M（男）或 F（女）";
const REQUIRED_MESSAGE: &str = "姓名、性別和生日為必填欄位";

/// User player with the number of registrations it takes part in.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPlayerWithCount {
    pub player: entity::user_player::Model,
    pub participation_count: u64,
}

impl UserPlayerWithCount {
    pub fn into_dto(self) -> UserPlayerDto {
        let player = self.player;
        UserPlayerDto {
            id: player.id,
            user_id: player.user_id,
            name: player.name,
            gender: gender_code(player.gender).to_string(),
            birthday: player.birthday,
            is_banned: player.is_banned,
            ban_reason: player.ban_reason,
            ban_until: player.ban_until,
            participation_count: self.participation_count,
            created_at: player.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserPlayerParams {
    pub user_id: i32,
    pub name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
}

impl CreateUserPlayerParams {
    pub fn from_dto(user_id: i32, dto: CreateUserPlayerDto) -> Result<Self, AppError> {
        let missing = || AppError::BadRequest(REQUIRED_MESSAGE.to_string());

        let name = optional_text(dto.name).ok_or_else(missing)?;
        let gender = optional_text(dto.gender).ok_or_else(missing)?;
        let birthday = optional_text(dto.birthday).ok_or_else(missing)?;

        Ok(Self {
            user_id,
            name: validate::name(&name, REQUIRED_MESSAGE, "姓名不能超過 50 個字元")?,
            gender: validate::gender(&gender, GENDER_MESSAGE)?,
            birthday: validate::birthday(&birthday)?,
        })
    }
}

/// Partial update. Lifting a ban clears its reason and expiry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateUserPlayerParams {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub birthday: Option<NaiveDate>,
    pub is_banned: Option<bool>,
    pub ban_reason: Option<Option<String>>,
    pub ban_until: Option<Option<DateTime<Utc>>>,
}

impl UpdateUserPlayerParams {
    pub fn from_dto(dto: UpdateUserPlayerDto) -> Result<Self, AppError> {
        let name = dto
            .name
            .map(|n| validate::name(&n, REQUIRED_MESSAGE, "姓名不能超過 50 個字元"))
            .transpose()?;
        let gender = dto
            .gender
            .map(|g| validate::gender(&g, GENDER_MESSAGE))
            .transpose()?;
        let birthday = dto.birthday.map(|b| validate::birthday(&b)).transpose()?;

        let (ban_reason, ban_until) = match dto.is_banned {
            Some(false) => (Some(None), Some(None)),
            _ => (
                dto.ban_reason.map(|r| optional_text(Some(r))),
                dto.ban_until.map(Some),
            ),
        };

        Ok(Self {
            name,
            gender,
            birthday,
            is_banned: dto.is_banned,
            ban_reason,
            ban_until,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_all_fields() {
        let err = CreateUserPlayerParams::from_dto(
            1,
            CreateUserPlayerDto {
                name: Some("Wu".to_string()),
                gender: Some("M".to_string()),
                birthday: None,
            },
        )
        .unwrap_err();

        assert_eq!(err.to_string(), REQUIRED_MESSAGE);
    }

    #[test]
    fn create_rejects_unknown_gender() {
        let err = CreateUserPlayerParams::from_dto(
            1,
            CreateUserPlayerDto {
                name: Some("Wu".to_string()),
                gender: Some("male".to_string()),
                birthday: Some("2000-01-01".to_string()),
            },
        )
        .unwrap_err();

        assert_eq!(err.to_string(), GENDER_MESSAGE);
    }

    #[test]
    fn banning_keeps_supplied_reason() {
        let params = UpdateUserPlayerParams::from_dto(UpdateUserPlayerDto {
            is_banned: Some(true),
            ban_reason: Some("misconduct".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(params.is_banned, Some(true));
        assert_eq!(params.ban_reason, Some(Some("misconduct".to_string())));
        assert_eq!(params.ban_until, None);
    }
}
