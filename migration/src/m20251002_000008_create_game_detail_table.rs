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
                    .table(GameDetail::Table)
                    .if_not_exists()
                    .col(pk_auto(GameDetail::Id))
                    .col(integer_uniq(GameDetail::GameId))
                    .col(text_null(GameDetail::Basis))
                    .col(text_null(GameDetail::Note))
                    .col(timestamp(GameDetail::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_detail_game_id")
                            .from(GameDetail::Table, GameDetail::GameId)
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
            .drop_table(Table::drop().table(GameDetail::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GameDetail {
    Table,
    Id,
    GameId,
    Basis,
    Note,
    UpdatedAt,
}
