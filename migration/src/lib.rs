pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_user_table;
mod m20251001_000002_create_password_reset_token_table;
mod m20251001_000003_create_team_table;
mod m20251001_000004_create_team_member_table;
mod m20251001_000005_create_team_staff_table;
mod m20251001_000006_create_user_player_table;
mod m20251002_000007_create_game_table;
mod m20251002_000008_create_game_detail_table;
mod m20251002_000009_create_game_category_table;
mod m20251002_000010_create_game_fee_table;
mod m20251003_000011_create_registration_table;
mod m20251003_000012_create_registration_participant_table;
mod m20251004_000013_create_activity_log_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_user_table::Migration),
            Box::new(m20251001_000002_create_password_reset_token_table::Migration),
            Box::new(m20251001_000003_create_team_table::Migration),
            Box::new(m20251001_000004_create_team_member_table::Migration),
            Box::new(m20251001_000005_create_team_staff_table::Migration),
            Box::new(m20251001_000006_create_user_player_table::Migration),
            Box::new(m20251002_000007_create_game_table::Migration),
            Box::new(m20251002_000008_create_game_detail_table::Migration),
            Box::new(m20251002_000009_create_game_category_table::Migration),
            Box::new(m20251002_000010_create_game_fee_table::Migration),
            Box::new(m20251003_000011_create_registration_table::Migration),
            Box::new(m20251003_000012_create_registration_participant_table::Migration),
            Box::new(m20251004_000013_create_activity_log_table::Migration),
        ]
    }
}
