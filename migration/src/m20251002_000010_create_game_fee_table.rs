use sea_orm_migration::{prelude::*, schema::*};

use super::{
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
                    .table(GameFee::Table)
                    .if_not_exists()
                    .col(pk_auto(GameFee::Id))
                    .col(integer(GameFee::GameId))
                    .col(integer_null(GameFee::CategoryId))
                    .col(string(GameFee::FeeType))
                    .col(string_null(GameFee::Description))
                    .col(integer(GameFee::Amount))
                    .col(boolean(GameFee::IsRequired).default(true))
                    .col(timestamp(GameFee::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_fee_game_id")
                            .from(GameFee::Table, GameFee::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_fee_category_id")
                            .from(GameFee::Table, GameFee::CategoryId)
                            .to(GameCategory::Table, GameCategory::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameFee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GameFee {
    Table,
    Id,
    GameId,
    CategoryId,
    FeeType,
    Description,
    Amount,
    IsRequired,
    CreatedAt,
}
