//! Game and game category factories.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for games. Windows default to an open signup period around now.
pub struct GameFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    region: String,
    signup_start: DateTime<Utc>,
    signup_end: DateTime<Utc>,
    game_start: DateTime<Utc>,
    game_end: DateTime<Utc>,
}

impl<'a> GameFactory<'a> {
    /// Defaults:
    /// - signup window: one day ago to one day ahead
    /// - game window: five to six days ahead
    /// - region: `"taipei"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let now = Utc::now();
        Self {
            db,
            name: format!("Game {}", next_id()),
            region: "taipei".to_string(),
            signup_start: now - Duration::days(1),
            signup_end: now + Duration::days(1),
            game_start: now + Duration::days(5),
            game_end: now + Duration::days(6),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the signup window.
    pub fn signup_window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.signup_start = start;
        self.signup_end = end;
        self
    }

    /// Sets the event window.
    pub fn game_window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.game_start = start;
        self.game_end = end;
        self
    }

    pub async fn build(self) -> Result<entity::game::Model, DbErr> {
        let now = Utc::now();
        entity::game::ActiveModel {
            name: ActiveValue::Set(self.name),
            region: ActiveValue::Set(self.region),
            venue: ActiveValue::Set("Test Arena".to_string()),
            address: ActiveValue::Set("1 Test Road".to_string()),
            signup_start: ActiveValue::Set(self.signup_start),
            signup_end: ActiveValue::Set(self.signup_end),
            game_start: ActiveValue::Set(self.game_start),
            game_end: ActiveValue::Set(self.game_end),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a game whose signup window is currently open.
pub async fn create_open_game(db: &DatabaseConnection) -> Result<entity::game::Model, DbErr> {
    GameFactory::new(db).build().await
}

/// Alias of `create_open_game` for tests that do not care about the window.
pub async fn create_game(db: &DatabaseConnection) -> Result<entity::game::Model, DbErr> {
    create_open_game(db).await
}

/// Creates a category in `game_id`.
pub async fn create_category(
    db: &DatabaseConnection,
    game_id: i32,
) -> Result<entity::game_category::Model, DbErr> {
    entity::game_category::ActiveModel {
        game_id: ActiveValue::Set(game_id),
        category_name: ActiveValue::Set(format!("Category {}", next_id())),
        conditions: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a fee in `game_id`, optionally scoped to a category.
pub async fn create_fee(
    db: &DatabaseConnection,
    game_id: i32,
    category_id: Option<i32>,
    amount: i32,
) -> Result<entity::game_fee::Model, DbErr> {
    entity::game_fee::ActiveModel {
        game_id: ActiveValue::Set(game_id),
        category_id: ActiveValue::Set(category_id),
        fee_type: ActiveValue::Set("報名費".to_string()),
        description: ActiveValue::Set(None),
        amount: ActiveValue::Set(amount),
        is_required: ActiveValue::Set(true),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
