use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::server::{
    data::activity_log::ActivityLogRepository,
    error::AppError,
    model::activity_log::{ActivityLogFilter, CreateActivityLogParams, PaginatedActivityLogs},
};

pub struct ActivityLogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityLogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends an entry on the service's connection.
    pub async fn record(&self, params: CreateActivityLogParams) -> Result<(), AppError> {
        record_on(self.db, params).await
    }

    pub async fn search(&self, filter: ActivityLogFilter) -> Result<PaginatedActivityLogs, AppError> {
        let (entries, total) = ActivityLogRepository::new(self.db).search(&filter).await?;

        Ok(PaginatedActivityLogs {
            entries,
            total,
            limit: filter.page_limit(),
            offset: filter.page_offset(),
        })
    }
}

/// Appends an entry on `db`, which may be an open transaction so the entry commits together
/// with the change it describes.
pub async fn record_on<C: ConnectionTrait>(
    db: &C,
    params: CreateActivityLogParams,
) -> Result<(), AppError> {
    tracing::info!(
        action = %params.action,
        entity = %params.entity,
        entity_id = params.entity_id.as_deref().unwrap_or("-"),
        user_id = params.user_id,
        "activity"
    );
    ActivityLogRepository::new(db).create(params).await?;
    Ok(())
}
