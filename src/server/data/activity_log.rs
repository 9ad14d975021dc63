use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::server::model::activity_log::{ActivityLogFilter, CreateActivityLogParams};

/// Append-only repository for activity log entries.
pub struct ActivityLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ActivityLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateActivityLogParams,
    ) -> Result<entity::activity_log::Model, DbErr> {
        entity::activity_log::ActiveModel {
            action: ActiveValue::Set(params.action),
            entity: ActiveValue::Set(params.entity),
            entity_id: ActiveValue::Set(params.entity_id),
            user_id: ActiveValue::Set(params.user_id),
            description: ActiveValue::Set(params.description),
            metadata: ActiveValue::Set(params.metadata.map(|value| value.to_string())),
            ip_address: ActiveValue::Set(params.client.ip_address),
            user_agent: ActiveValue::Set(params.client.user_agent),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Returns one page of matching entries, newest first, and the total match count.
    pub async fn search(
        &self,
        filter: &ActivityLogFilter,
    ) -> Result<(Vec<entity::activity_log::Model>, u64), DbErr> {
        let total = Self::filtered(filter).count(self.db).await?;

        let entries = Self::filtered(filter)
            .order_by_desc(entity::activity_log::Column::CreatedAt)
            .order_by_desc(entity::activity_log::Column::Id)
            .limit(filter.page_limit())
            .offset(filter.page_offset())
            .all(self.db)
            .await?;

        Ok((entries, total))
    }

    fn filtered(filter: &ActivityLogFilter) -> Select<entity::activity_log::Entity> {
        let mut select = entity::prelude::ActivityLog::find();

        if let Some(action) = &filter.action {
            select = select.filter(entity::activity_log::Column::Action.eq(action.as_str()));
        }
        if let Some(entity_name) = &filter.entity {
            select = select.filter(entity::activity_log::Column::Entity.eq(entity_name.as_str()));
        }
        if let Some(user_id) = filter.user_id {
            select = select.filter(entity::activity_log::Column::UserId.eq(user_id));
        }
        if let Some(start) = filter.start_date {
            select = select.filter(entity::activity_log::Column::CreatedAt.gte(start));
        }
        if let Some(end) = filter.end_date {
            select = select.filter(entity::activity_log::Column::CreatedAt.lte(end));
        }

        select
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sea_orm::DbErr;
    use serde_json::json;
    use test_utils::builder::TestBuilder;

    use super::*;
    use crate::server::model::activity_log::ClientInfo;

    /// Tests appending an entry with metadata and client info.
    ///
    /// Expected: Ok with metadata stored as JSON text
    #[tokio::test]
    async fn stores_metadata_as_text() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let client = ClientInfo {
            ip_address: Some("10.0.0.1".to_string()),
            user_agent: Some("curl/8".to_string()),
        };
        let entry = ActivityLogRepository::new(db)
            .create(
                CreateActivityLogParams::new("create", "game")
                    .entity_id(7)
                    .user_id(1)
                    .metadata(json!({ "name": "Spring Cup" }))
                    .client(&client),
            )
            .await?;

        assert_eq!(entry.entity_id.as_deref(), Some("7"));
        assert_eq!(entry.metadata.as_deref(), Some(r#"{"name":"Spring Cup"}"#));
        assert_eq!(entry.ip_address.as_deref(), Some("10.0.0.1"));

        Ok(())
    }

    /// Tests filtering, pagination and ordering of the search.
    ///
    /// Expected: Ok with the total counting every match and the page holding the newest
    #[tokio::test]
    async fn search_filters_and_paginates() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let repo = ActivityLogRepository::new(db);

        for i in 0..3 {
            repo.create(CreateActivityLogParams::new("approve", "registration").entity_id(i))
                .await?;
        }
        repo.create(CreateActivityLogParams::new("delete", "game"))
            .await?;

        let (entries, total) = repo
            .search(&ActivityLogFilter {
                entity: Some("registration".to_string()),
                limit: 2,
                ..Default::default()
            })
            .await?;

        assert_eq!(total, 3);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_id.as_deref(), Some("2"));

        let (_, future_total) = repo
            .search(&ActivityLogFilter {
                start_date: Some(Utc::now() + Duration::hours(1)),
                limit: ActivityLogFilter::DEFAULT_LIMIT,
                ..Default::default()
            })
            .await?;
        assert_eq!(future_total, 0);

        Ok(())
    }

    /// Tests that unset and oversized paging values reach the database in range.
    ///
    /// Expected: Ok with the default page for `limit: 0` and an empty page past the end
    #[tokio::test]
    async fn search_normalizes_paging() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let repo = ActivityLogRepository::new(db);

        repo.create(CreateActivityLogParams::new("delete", "game"))
            .await?;

        let (entries, total) = repo
            .search(&ActivityLogFilter {
                limit: 0,
                ..Default::default()
            })
            .await?;
        assert_eq!((entries.len(), total), (1, 1));

        let (entries, total) = repo
            .search(&ActivityLogFilter {
                limit: u64::MAX,
                offset: u64::MAX,
                ..Default::default()
            })
            .await?;
        assert!(entries.is_empty());
        assert_eq!(total, 1);

        Ok(())
    }
}
