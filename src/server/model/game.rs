//! Game domain models and parameters.
//!
//! `UpsertGameParams::from_dto` is the single place where a create/update payload is checked:
//! required fields, date parsing, window ordering and fee shape. Services receive values that
//! already satisfy `signup_start < signup_end < game_start <= game_end`.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        game::{
            CategoryInputDto, CreateGameCategoryDto, FeeInputDto, GameCategoryDto, GameDetailDto, GameDto, GameFeeDto,
            GameListItemDto, GameStatus, GameWithDetailsDto, UpdateGameCategoryDto,
            UpsertGameDto,
        },
        region::region_name,
    },
    server::{error::AppError, util::date::parse_datetime, util::validate::optional_text},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i32,
    pub name: String,
    pub region: String,
    pub venue: String,
    pub address: String,
    pub signup_start: DateTime<Utc>,
    pub signup_end: DateTime<Utc>,
    pub game_start: DateTime<Utc>,
    pub game_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    pub fn from_entity(entity: entity::game::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            region: entity.region,
            venue: entity.venue,
            address: entity.address,
            signup_start: entity.signup_start,
            signup_end: entity.signup_end,
            game_start: entity.game_start,
            game_end: entity.game_end,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> GameStatus {
        GameStatus::at(
            now,
            self.signup_start,
            self.signup_end,
            self.game_start,
            self.game_end,
        )
    }

    /// Whether signup is open at `now`. Both bounds are inclusive.
    pub fn signup_open_at(&self, now: DateTime<Utc>) -> bool {
        self.signup_start <= now && now <= self.signup_end
    }

    /// Converts to a DTO with the status derived at `now`.
    pub fn into_dto(self, now: DateTime<Utc>) -> GameDto {
        let status = self.status_at(now);
        GameDto {
            id: self.id,
            region_name: region_name(&self.region).to_string(),
            name: self.name,
            region: self.region,
            venue: self.venue,
            address: self.address,
            signup_start: self.signup_start,
            signup_end: self.signup_end,
            game_start: self.game_start,
            game_end: self.game_end,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Game with the counts shown in listings.
#[derive(Debug, Clone, PartialEq)]
pub struct GameWithCounts {
    pub game: Game,
    pub registration_count: u64,
    pub category_count: u64,
}

impl GameWithCounts {
    pub fn into_dto(self, now: DateTime<Utc>) -> GameListItemDto {
        GameListItemDto {
            game: self.game.into_dto(now),
            registration_count: self.registration_count,
            category_count: self.category_count,
        }
    }
}

pub fn detail_into_dto(entity: entity::game_detail::Model) -> GameDetailDto {
    GameDetailDto {
        id: entity.id,
        game_id: entity.game_id,
        basis: entity.basis,
        note: entity.note,
        updated_at: entity.updated_at,
    }
}

pub fn category_into_dto(entity: entity::game_category::Model) -> GameCategoryDto {
    GameCategoryDto {
        id: entity.id,
        game_id: entity.game_id,
        category_name: entity.category_name,
        conditions: entity.conditions,
    }
}

pub fn fee_into_dto(entity: entity::game_fee::Model) -> GameFeeDto {
    GameFeeDto {
        id: entity.id,
        game_id: entity.game_id,
        category_id: entity.category_id,
        fee_type: entity.fee_type,
        description: entity.description,
        amount: entity.amount,
        is_required: entity.is_required,
    }
}

/// Game with its detail row, categories and fees.
#[derive(Debug, Clone, PartialEq)]
pub struct GameWithDetails {
    pub game: Game,
    pub detail: Option<entity::game_detail::Model>,
    pub categories: Vec<entity::game_category::Model>,
    pub fees: Vec<entity::game_fee::Model>,
}

impl GameWithDetails {
    pub fn into_dto(self, now: DateTime<Utc>) -> GameWithDetailsDto {
        GameWithDetailsDto {
            game: self.game.into_dto(now),
            detail: self.detail.map(detail_into_dto),
            categories: self.categories.into_iter().map(category_into_dto).collect(),
            fees: self.fees.into_iter().map(fee_into_dto).collect(),
        }
    }
}

/// Validated scalar columns of a game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameFields {
    pub name: String,
    pub region: String,
    pub venue: String,
    pub address: String,
    pub signup_start: DateTime<Utc>,
    pub signup_end: DateTime<Utc>,
    pub game_start: DateTime<Utc>,
    pub game_end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryParams {
    pub category_name: String,
    pub conditions: Option<String>,
}

/// A fee to insert. `category_index` refers to the position in the accompanying category list.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeParams {
    pub fee_type: String,
    pub description: Option<String>,
    pub amount: i32,
    pub is_required: bool,
    pub category_index: Option<usize>,
}

/// Nested write of a game. `categories: None` leaves existing categories and fees untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertGameParams {
    pub fields: GameFields,
    /// `Some` when either `basis` or `note` was supplied.
    pub detail: Option<GameDetailParams>,
    pub categories: Option<Vec<CategoryParams>>,
    pub fees: Vec<FeeParams>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameDetailParams {
    pub basis: Option<String>,
    pub note: Option<String>,
}

fn required_field(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("缺少必要欄位: {}", field))),
    }
}

fn required_date(value: Option<String>, field: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = required_field(value, field)?;
    parse_datetime(&raw).ok_or_else(|| AppError::BadRequest(format!("日期格式不正確: {}", field)))
}

impl GameFields {
    /// Checks the window ordering, reporting the first violation.
    pub fn validate_windows(&self) -> Result<(), AppError> {
        if self.signup_start >= self.signup_end {
            return Err(AppError::BadRequest(
                "報名開始時間必須早於報名結束時間".to_string(),
            ));
        }
        if self.signup_end >= self.game_start {
            return Err(AppError::BadRequest(
                "報名結束時間必須早於賽事開始時間".to_string(),
            ));
        }
        if self.game_start > self.game_end {
            return Err(AppError::BadRequest(
                "賽事開始時間必須早於賽事結束時間".to_string(),
            ));
        }
        Ok(())
    }
}

impl CategoryParams {
    pub fn from_dto(dto: CategoryInputDto) -> Result<Self, AppError> {
        Ok(Self {
            category_name: required_field(Some(dto.category_name), "categoryName")?,
            conditions: optional_text(dto.conditions),
        })
    }
}

impl FeeParams {
    /// `category_count` is the number of categories in the same payload, or `None` when the
    /// payload carries no category list.
    pub fn from_dto(dto: FeeInputDto, category_count: Option<usize>) -> Result<Self, AppError> {
        let fee_type = required_field(Some(dto.fee_type), "feeType")?;
        if dto.amount < 0 {
            return Err(AppError::BadRequest("費用金額不能為負數".to_string()));
        }
        if let Some(index) = dto.category_index {
            if category_count.map_or(true, |count| index >= count) {
                return Err(AppError::BadRequest("費用對應的賽事類別不存在".to_string()));
            }
        }
        Ok(Self {
            fee_type,
            description: optional_text(dto.description),
            amount: dto.amount,
            is_required: dto.is_required.unwrap_or(true),
            category_index: dto.category_index,
        })
    }
}

impl UpsertGameParams {
    /// Validates a create/update payload.
    ///
    /// # Returns
    /// - `Ok(UpsertGameParams)` - Payload is complete and consistent
    /// - `Err(AppError::BadRequest)` - First violation: missing field, unparsable date, window
    ///   order, negative fee or dangling `categoryIndex`
    pub fn from_dto(dto: UpsertGameDto) -> Result<Self, AppError> {
        let fields = GameFields {
            name: required_field(dto.name, "name")?,
            region: required_field(dto.region, "region")?,
            venue: required_field(dto.venue, "venue")?,
            address: required_field(dto.address, "address")?,
            signup_start: required_date(dto.signup_start, "signupStart")?,
            signup_end: required_date(dto.signup_end, "signupEnd")?,
            game_start: required_date(dto.game_start, "gameStart")?,
            game_end: required_date(dto.game_end, "gameEnd")?,
        };
        fields.validate_windows()?;

        let detail = if dto.basis.is_some() || dto.note.is_some() {
            Some(GameDetailParams {
                basis: optional_text(dto.basis),
                note: optional_text(dto.note),
            })
        } else {
            None
        };

        let categories = dto
            .categories
            .map(|list| {
                list.into_iter()
                    .map(CategoryParams::from_dto)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let category_count = categories.as_ref().map(Vec::len);
        let fees = dto
            .fees
            .unwrap_or_default()
            .into_iter()
            .map(|fee| FeeParams::from_dto(fee, category_count))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            fields,
            detail,
            categories,
            fees,
        })
    }
}

/// Standalone category creation.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCategoryParams {
    pub game_id: i32,
    pub category: CategoryParams,
}

impl GameCategoryParams {
    pub fn from_dto(dto: CreateGameCategoryDto) -> Result<Self, AppError> {
        let category_name = optional_text(dto.category_name);
        let (Some(game_id), Some(category_name)) = (dto.game_id, category_name) else {
            return Err(AppError::BadRequest(
                "缺少必要欄位: gameId/categoryName".to_string(),
            ));
        };

        Ok(Self {
            game_id,
            category: CategoryParams {
                category_name,
                conditions: optional_text(dto.conditions),
            },
        })
    }
}

impl CategoryParams {
    /// Applies a partial update on top of `current`. Absent fields keep their value.
    pub fn merge_update(
        current: &entity::game_category::Model,
        dto: UpdateGameCategoryDto,
    ) -> Result<Self, AppError> {
        let category_name = match dto.category_name {
            Some(name) => required_field(Some(name), "categoryName")?,
            None => current.category_name.clone(),
        };
        let conditions = match dto.conditions {
            Some(conditions) => optional_text(Some(conditions)),
            None => current.conditions.clone(),
        };

        Ok(Self {
            category_name,
            conditions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> UpsertGameDto {
        UpsertGameDto {
            name: Some("Spring Open".to_string()),
            region: Some("taipei".to_string()),
            venue: Some("Arena".to_string()),
            address: Some("No. 1 Road".to_string()),
            signup_start: Some("2025-01-01".to_string()),
            signup_end: Some("2025-01-10".to_string()),
            game_start: Some("2025-01-15".to_string()),
            game_end: Some("2025-01-16".to_string()),
            ..Default::default()
        }
    }

    fn message(result: Result<UpsertGameParams, AppError>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn accepts_ordered_windows() {
        let params = UpsertGameParams::from_dto(valid_dto()).unwrap();

        assert_eq!(params.fields.name, "Spring Open");
        assert!(params.categories.is_none());
        assert!(params.detail.is_none());
    }

    #[test]
    fn reports_first_missing_field() {
        let dto = UpsertGameDto {
            venue: None,
            address: None,
            ..valid_dto()
        };

        assert_eq!(message(UpsertGameParams::from_dto(dto)), "缺少必要欄位: venue");
    }

    #[test]
    fn signup_end_after_game_start_is_rejected() {
        let dto = UpsertGameDto {
            signup_end: Some("2025-01-20".to_string()),
            ..valid_dto()
        };

        assert_eq!(
            message(UpsertGameParams::from_dto(dto)),
            "報名結束時間必須早於賽事開始時間"
        );
    }

    #[test]
    fn signup_start_must_precede_signup_end() {
        let dto = UpsertGameDto {
            signup_start: Some("2025-01-10".to_string()),
            ..valid_dto()
        };

        assert_eq!(
            message(UpsertGameParams::from_dto(dto)),
            "報名開始時間必須早於報名結束時間"
        );
    }

    #[test]
    fn game_may_start_and_end_on_the_same_instant() {
        let dto = UpsertGameDto {
            game_end: Some("2025-01-15".to_string()),
            ..valid_dto()
        };

        assert!(UpsertGameParams::from_dto(dto).is_ok());
    }

    #[test]
    fn fee_index_must_point_at_a_category() {
        let dto = UpsertGameDto {
            categories: Some(vec![CategoryInputDto {
                category_name: "Open".to_string(),
                conditions: None,
            }]),
            fees: Some(vec![FeeInputDto {
                fee_type: "entry".to_string(),
                amount: 500,
                category_index: Some(1),
                ..Default::default()
            }]),
            ..valid_dto()
        };

        assert!(UpsertGameParams::from_dto(dto).is_err());
    }

    #[test]
    fn negative_fee_is_rejected() {
        let dto = UpsertGameDto {
            fees: Some(vec![FeeInputDto {
                fee_type: "entry".to_string(),
                amount: -1,
                ..Default::default()
            }]),
            ..valid_dto()
        };

        assert_eq!(message(UpsertGameParams::from_dto(dto)), "費用金額不能為負數");
    }

    #[test]
    fn standalone_category_requires_game_and_name() {
        let err = GameCategoryParams::from_dto(CreateGameCategoryDto {
            game_id: Some(1),
            category_name: Some("  ".to_string()),
            conditions: None,
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "缺少必要欄位: gameId/categoryName");
    }
}
