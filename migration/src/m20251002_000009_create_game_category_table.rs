use sea_orm_migration::{prelude::*, schema::*};

use super::m20251002_000007_create_game_table::Game;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameCategory::Table)
                    .if_not_exists()
                    .col(pk_auto(GameCategory::Id))
                    .col(integer(GameCategory::GameId))
                    .col(string(GameCategory::CategoryName))
                    .col(text_null(GameCategory::Conditions))
                    .col(timestamp(GameCategory::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_category_game_id")
                            .from(GameCategory::Table, GameCategory::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GameCategory {
    Table,
    Id,
    GameId,
    CategoryName,
    Conditions,
    CreatedAt,
}
