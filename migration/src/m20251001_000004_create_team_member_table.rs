use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000003_create_team_table::Team;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamMember::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamMember::Id))
                    .col(integer(TeamMember::TeamId))
                    .col(string(TeamMember::Name))
                    .col(string(TeamMember::Role).default("選手"))
                    .col(string_len(TeamMember::Gender, 1))
                    .col(date(TeamMember::Birthday))
                    .col(string_null(TeamMember::Phone))
                    .col(string_null(TeamMember::Email))
                    .col(string_null(TeamMember::LineId))
                    .col(boolean(TeamMember::IsBanned).default(false))
                    .col(string_null(TeamMember::BanReason))
                    .col(timestamp_null(TeamMember::BanUntil))
                    .col(timestamp(TeamMember::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(TeamMember::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_member_team_id")
                            .from(TeamMember::Table, TeamMember::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_member_team_id")
                    .table(TeamMember::Table)
                    .col(TeamMember::TeamId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TeamMember {
    Table,
    Id,
    TeamId,
    Name,
    Role,
    Gender,
    Birthday,
    Phone,
    Email,
    LineId,
    IsBanned,
    BanReason,
    BanUntil,
    CreatedAt,
    UpdatedAt,
}
