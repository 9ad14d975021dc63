use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityLog::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityLog::Id))
                    .col(string(ActivityLog::Action))
                    .col(string(ActivityLog::Entity))
                    .col(string_null(ActivityLog::EntityId))
                    .col(integer_null(ActivityLog::UserId))
                    .col(text_null(ActivityLog::Description))
                    .col(text_null(ActivityLog::Metadata))
                    .col(string_null(ActivityLog::IpAddress))
                    .col(string_null(ActivityLog::UserAgent))
                    .col(timestamp(ActivityLog::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_log_created_at")
                    .table(ActivityLog::Table)
                    .col(ActivityLog::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActivityLog {
    Table,
    Id,
    Action,
    Entity,
    EntityId,
    UserId,
    Description,
    Metadata,
    IpAddress,
    UserAgent,
    CreatedAt,
}
