//! Team staff data repository.

use chrono::Utc;
use entity::team_staff::StaffRole;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::team::{CreateTeamStaffParams, UpdateTeamStaffParams};

pub struct TeamStaffRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeamStaffRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::team_staff::Model>, DbErr> {
        entity::prelude::TeamStaff::find_by_id(id).one(self.db).await
    }

    /// Staff of a team, optionally restricted to one role.
    pub async fn find_by_team(
        &self,
        team_id: i32,
        role: Option<StaffRole>,
    ) -> Result<Vec<entity::team_staff::Model>, DbErr> {
        let mut select = entity::prelude::TeamStaff::find()
            .filter(entity::team_staff::Column::TeamId.eq(team_id));

        if let Some(role) = role {
            select = select.filter(entity::team_staff::Column::Role.eq(role));
        }

        select
            .order_by_asc(entity::team_staff::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn create(
        &self,
        params: CreateTeamStaffParams,
    ) -> Result<entity::team_staff::Model, DbErr> {
        let now = Utc::now();
        entity::team_staff::ActiveModel {
            team_id: ActiveValue::Set(params.team_id),
            role: ActiveValue::Set(params.role),
            name: ActiveValue::Set(params.name),
            phone: ActiveValue::Set(params.phone),
            email: ActiveValue::Set(params.email),
            address: ActiveValue::Set(params.address),
            line_id: ActiveValue::Set(params.line_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn update(
        &self,
        staff: entity::team_staff::Model,
        params: UpdateTeamStaffParams,
    ) -> Result<entity::team_staff::Model, DbErr> {
        let mut active = staff.into_active_model();

        if let Some(role) = params.role {
            active.role = ActiveValue::Set(role);
        }
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(phone) = params.phone {
            active.phone = ActiveValue::Set(phone);
        }
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(email);
        }
        if let Some(address) = params.address {
            active.address = ActiveValue::Set(address);
        }
        if let Some(line_id) = params.line_id {
            active.line_id = ActiveValue::Set(line_id);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::TeamStaff::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    #[tokio::test]
    async fn filters_staff_by_role() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_team_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = factory::create_user(db).await?;
        let team = factory::create_team(db, owner.id).await?;
        let leader = factory::create_team_staff(db, team.id, StaffRole::Leader).await?;
        factory::create_team_staff(db, team.id, StaffRole::Coach).await?;

        let repo = TeamStaffRepository::new(db);

        assert_eq!(repo.find_by_team(team.id, None).await?.len(), 2);

        let leaders = repo.find_by_team(team.id, Some(StaffRole::Leader)).await?;
        assert_eq!(leaders.len(), 1);
        assert_eq!(leaders[0].id, leader.id);

        Ok(())
    }
}
