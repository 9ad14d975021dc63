//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique names and emails in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user, a game whose signup window is open now, and one category in it.
///
/// # Returns
/// - `Ok((user, game, category))` - The created rows
/// - `Err(DbErr)` - Database error during creation
pub async fn create_open_game_for_user(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::game::Model,
        entity::game_category::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let game = crate::factory::game::create_open_game(db).await?;
    let category = crate::factory::game::create_category(db, game.id).await?;

    Ok((user, game, category))
}
