use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(pk_auto(Game::Id))
                    .col(string(Game::Name))
                    .col(string(Game::Region))
                    .col(string(Game::Venue))
                    .col(string(Game::Address))
                    .col(timestamp(Game::SignupStart))
                    .col(timestamp(Game::SignupEnd))
                    .col(timestamp(Game::GameStart))
                    .col(timestamp(Game::GameEnd))
                    .col(timestamp(Game::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Game::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_region")
                    .table(Game::Table)
                    .col(Game::Region)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Game {
    Table,
    Id,
    Name,
    Region,
    Venue,
    Address,
    SignupStart,
    SignupEnd,
    GameStart,
    GameEnd,
    CreatedAt,
    UpdatedAt,
}
