use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251001_000004_create_team_member_table::TeamMember,
    m20251001_000006_create_user_player_table::UserPlayer,
    m20251003_000011_create_registration_table::Registration,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RegistrationParticipant::Table)
                    .if_not_exists()
                    .col(pk_auto(RegistrationParticipant::Id))
                    .col(integer(RegistrationParticipant::RegistrationId))
                    .col(integer_null(RegistrationParticipant::TeamMemberId))
                    .col(integer_null(RegistrationParticipant::UserPlayerId))
                    .col(boolean(RegistrationParticipant::IsMainPlayer).default(false))
                    .col(
                        timestamp(RegistrationParticipant::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_participant_registration_id")
                            .from(
                                RegistrationParticipant::Table,
                                RegistrationParticipant::RegistrationId,
                            )
                            .to(Registration::Table, Registration::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_participant_team_member_id")
                            .from(
                                RegistrationParticipant::Table,
                                RegistrationParticipant::TeamMemberId,
                            )
                            .to(TeamMember::Table, TeamMember::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_participant_user_player_id")
                            .from(
                                RegistrationParticipant::Table,
                                RegistrationParticipant::UserPlayerId,
                            )
                            .to(UserPlayer::Table, UserPlayer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(RegistrationParticipant::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum RegistrationParticipant {
    Table,
    Id,
    RegistrationId,
    TeamMemberId,
    UserPlayerId,
    IsMainPlayer,
    CreatedAt,
}
