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
                    .table(TeamStaff::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamStaff::Id))
                    .col(integer(TeamStaff::TeamId))
                    .col(string_len(TeamStaff::Role, 16))
                    .col(string(TeamStaff::Name))
                    .col(string_null(TeamStaff::Phone))
                    .col(string_null(TeamStaff::Email))
                    .col(string_null(TeamStaff::Address))
                    .col(string_null(TeamStaff::LineId))
                    .col(timestamp(TeamStaff::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(TeamStaff::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_staff_team_id")
                            .from(TeamStaff::Table, TeamStaff::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamStaff::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TeamStaff {
    Table,
    Id,
    TeamId,
    Role,
    Name,
    Phone,
    Email,
    Address,
    LineId,
    CreatedAt,
    UpdatedAt,
}
