use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserPlayer::Table)
                    .if_not_exists()
                    .col(pk_auto(UserPlayer::Id))
                    .col(integer(UserPlayer::UserId))
                    .col(string(UserPlayer::Name))
                    .col(string_len(UserPlayer::Gender, 1))
                    .col(date(UserPlayer::Birthday))
                    .col(boolean(UserPlayer::IsBanned).default(false))
                    .col(string_null(UserPlayer::BanReason))
                    .col(timestamp_null(UserPlayer::BanUntil))
                    .col(timestamp(UserPlayer::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(UserPlayer::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_player_user_id")
                            .from(UserPlayer::Table, UserPlayer::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserPlayer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserPlayer {
    Table,
    Id,
    UserId,
    Name,
    Gender,
    Birthday,
    IsBanned,
    BanReason,
    BanUntil,
    CreatedAt,
    UpdatedAt,
}
