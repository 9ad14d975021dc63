//! Team data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct TeamRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeamRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::team::Model>, DbErr> {
        entity::prelude::Team::find_by_id(id).one(self.db).await
    }

    /// Teams created by `user_id`, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<entity::team::Model>, DbErr> {
        entity::prelude::Team::find()
            .filter(entity::team::Column::UserId.eq(user_id))
            .order_by_desc(entity::team::Column::CreatedAt)
            .order_by_desc(entity::team::Column::Id)
            .all(self.db)
            .await
    }

    /// Inserts a team.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created team
    /// - `Err(DbErr)` - Database error, including a unique violation on `name`
    pub async fn create(&self, user_id: i32, name: String) -> Result<entity::team::Model, DbErr> {
        let now = Utc::now();
        entity::team::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(name),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn rename(
        &self,
        team: entity::team::Model,
        name: String,
    ) -> Result<entity::team::Model, DbErr> {
        let mut active = team.into_active_model();
        active.name = ActiveValue::Set(name);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    /// Deletes a team. Members, staff and registrations cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Team::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }

    pub async fn count_members(&self, team_id: i32) -> Result<u64, DbErr> {
        entity::prelude::TeamMember::find()
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .count(self.db)
            .await
    }

    pub async fn count_registrations(&self, team_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Registration::find()
            .filter(entity::registration::Column::TeamId.eq(team_id))
            .count(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    #[tokio::test]
    async fn lists_only_the_users_teams() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_team_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = factory::create_user(db).await?;
        let other = factory::create_user(db).await?;
        let team = factory::create_team(db, owner.id).await?;
        factory::create_team(db, other.id).await?;
        factory::create_team_member(db, team.id).await?;
        factory::create_team_member(db, team.id).await?;

        let repo = TeamRepository::new(db);
        let teams = repo.find_by_user(owner.id).await?;

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].id, team.id);
        assert_eq!(repo.count_members(team.id).await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_is_a_unique_violation() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_team_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = factory::create_user(db).await?;
        let repo = TeamRepository::new(db);
        repo.create(owner.id, "Tigers".to_string()).await?;

        let err = repo
            .create(owner.id, "Tigers".to_string())
            .await
            .unwrap_err();

        assert!(matches!(
            err.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_members() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_team_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = factory::create_user(db).await?;
        let team = factory::create_team(db, owner.id).await?;
        factory::create_team_member(db, team.id).await?;

        let repo = TeamRepository::new(db);
        repo.delete(team.id).await?;

        assert!(repo.find_by_id(team.id).await?.is_none());
        assert_eq!(
            entity::prelude::TeamMember::find().count(db).await?,
            0
        );

        Ok(())
    }
}
