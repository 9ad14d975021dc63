use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251001_000001_create_user_table::User, m20251001_000003_create_team_table::Team,
    m20251002_000007_create_game_table::Game,
    m20251002_000009_create_game_category_table::GameCategory,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registration::Table)
                    .if_not_exists()
                    .col(pk_auto(Registration::Id))
                    .col(integer(Registration::GameId))
                    .col(integer(Registration::CategoryId))
                    .col(integer_null(Registration::TeamId))
                    .col(integer(Registration::RegistrantUserId))
                    .col(string_len(Registration::Status, 16).default("pending"))
                    .col(text_null(Registration::Note))
                    .col(timestamp(Registration::SubmittedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(Registration::ReviewedAt))
                    .col(integer_null(Registration::ReviewedBy))
                    .col(timestamp(Registration::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Registration::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_game_id")
                            .from(Registration::Table, Registration::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_category_id")
                            .from(Registration::Table, Registration::CategoryId)
                            .to(GameCategory::Table, GameCategory::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_team_id")
                            .from(Registration::Table, Registration::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_registrant_user_id")
                            .from(Registration::Table, Registration::RegistrantUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup index for the duplicate-signup check; not unique, see DESIGN.md
        manager
            .create_index(
                Index::create()
                    .name("idx_registration_game_category_team")
                    .table(Registration::Table)
                    .col(Registration::GameId)
                    .col(Registration::CategoryId)
                    .col(Registration::TeamId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Registration::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Registration {
    Table,
    Id,
    GameId,
    CategoryId,
    TeamId,
    RegistrantUserId,
    Status,
    Note,
    SubmittedAt,
    ReviewedAt,
    ReviewedBy,
    CreatedAt,
    UpdatedAt,
}
