use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

/// Where a game stands relative to its signup and event windows.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Signup has not opened yet.
    Upcoming,
    /// Signup is open.
    Registration,
    /// Signup closed, event not started.
    Closed,
    /// Event in progress.
    Ongoing,
    /// Event finished.
    Ended,
}

impl GameStatus {
    /// Derives the status at `now`. Window bounds are inclusive.
    pub fn at(
        now: DateTime<Utc>,
        signup_start: DateTime<Utc>,
        signup_end: DateTime<Utc>,
        game_start: DateTime<Utc>,
        game_end: DateTime<Utc>,
    ) -> Self {
        if now < signup_start {
            GameStatus::Upcoming
        } else if now <= signup_end {
            GameStatus::Registration
        } else if now < game_start {
            GameStatus::Closed
        } else if now <= game_end {
            GameStatus::Ongoing
        } else {
            GameStatus::Ended
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub id: i32,
    pub name: String,
    pub region: String,
    pub region_name: String,
    pub venue: String,
    pub address: String,
    pub signup_start: DateTime<Utc>,
    pub signup_end: DateTime<Utc>,
    pub game_start: DateTime<Utc>,
    pub game_end: DateTime<Utc>,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Game row as listed, with counts of its registrations and categories.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GameListItemDto {
    #[serde(flatten)]
    pub game: GameDto,
    pub registration_count: u64,
    pub category_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GameDetailDto {
    pub id: i32,
    pub game_id: i32,
    pub basis: Option<String>,
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GameCategoryDto {
    pub id: i32,
    pub game_id: i32,
    pub category_name: String,
    pub conditions: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GameFeeDto {
    pub id: i32,
    pub game_id: i32,
    pub category_id: Option<i32>,
    pub fee_type: String,
    pub description: Option<String>,
    pub amount: i32,
    pub is_required: bool,
}

/// A game with its detail row, categories and fees.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GameWithDetailsDto {
    #[serde(flatten)]
    pub game: GameDto,
    pub detail: Option<GameDetailDto>,
    pub categories: Vec<GameCategoryDto>,
    pub fees: Vec<GameFeeDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CategoryInputDto {
    pub category_name: String,
    pub conditions: Option<String>,
}

/// Fee input. `category_index` points into the `categories` list of the same payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FeeInputDto {
    pub fee_type: String,
    pub description: Option<String>,
    pub amount: i32,
    pub is_required: Option<bool>,
    pub category_index: Option<usize>,
}

/// Create/update payload for a game.
///
/// Every field is optional on the wire so that a missing required field produces a
/// field-specific message. Dates accept RFC 3339 or `YYYY-MM-DD`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpsertGameDto {
    pub name: Option<String>,
    pub region: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub signup_start: Option<String>,
    pub signup_end: Option<String>,
    pub game_start: Option<String>,
    pub game_end: Option<String>,
    pub basis: Option<String>,
    pub note: Option<String>,
    pub categories: Option<Vec<CategoryInputDto>>,
    pub fees: Option<Vec<FeeInputDto>>,
}

/// Payload for adding a single category to an existing game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateGameCategoryDto {
    pub game_id: Option<i32>,
    pub category_name: Option<String>,
    pub conditions: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameCategoryDto {
    pub category_name: Option<String>,
    pub conditions: Option<String>,
}
