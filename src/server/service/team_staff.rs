use entity::team_staff::StaffRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::team_staff::TeamStaffRepository,
    error::AppError,
    model::team::{CreateTeamStaffParams, UpdateTeamStaffParams},
    service::team::require_owned_team,
};

const FORBIDDEN: &str = "沒有權限操作此隊伍";

pub struct TeamStaffService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamStaffService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        actor: &entity::user::Model,
        team_id: i32,
        role: Option<StaffRole>,
    ) -> Result<Vec<entity::team_staff::Model>, AppError> {
        let team = require_owned_team(self.db, actor, team_id, FORBIDDEN).await?;

        Ok(TeamStaffRepository::new(self.db)
            .find_by_team(team.id, role)
            .await?)
    }

    pub async fn create(
        &self,
        actor: &entity::user::Model,
        params: CreateTeamStaffParams,
    ) -> Result<entity::team_staff::Model, AppError> {
        require_owned_team(self.db, actor, params.team_id, FORBIDDEN).await?;

        Ok(TeamStaffRepository::new(self.db).create(params).await?)
    }

    pub async fn update(
        &self,
        actor: &entity::user::Model,
        id: i32,
        params: UpdateTeamStaffParams,
    ) -> Result<entity::team_staff::Model, AppError> {
        let staff = self.find_owned(actor, id).await?;

        Ok(TeamStaffRepository::new(self.db)
            .update(staff, params)
            .await?)
    }

    pub async fn delete(&self, actor: &entity::user::Model, id: i32) -> Result<(), AppError> {
        let staff = self.find_owned(actor, id).await?;

        TeamStaffRepository::new(self.db).delete(staff.id).await?;

        Ok(())
    }

    /// Staff of other users' teams are reported as missing.
    async fn find_owned(
        &self,
        actor: &entity::user::Model,
        id: i32,
    ) -> Result<entity::team_staff::Model, AppError> {
        let not_found = || AppError::NotFound("找不到此隊職員".to_string());

        let staff = TeamStaffRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        match require_owned_team(self.db, actor, staff.team_id, FORBIDDEN).await {
            Ok(_) => Ok(staff),
            Err(AppError::Forbidden(_)) => Err(not_found()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    /// Tests that staff of another user's team reads as missing.
    ///
    /// Expected: Err(NotFound) for update and delete
    #[tokio::test]
    async fn other_users_staff_is_hidden() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_team_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TeamStaffService::new(db);

        let owner = factory::create_user(db).await?;
        let intruder = factory::create_user(db).await?;
        let team = factory::create_team(db, owner.id).await?;
        let staff = factory::create_team_staff(db, team.id, StaffRole::Coach).await?;

        let err = service
            .update(&intruder, staff.id, UpdateTeamStaffParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service.delete(&intruder, staff.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        Ok(())
    }

    /// Tests creating staff for someone else's team.
    ///
    /// Expected: Err(Forbidden)
    #[tokio::test]
    async fn create_requires_team_owner() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_team_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = factory::create_user(db).await?;
        let intruder = factory::create_user(db).await?;
        let team = factory::create_team(db, owner.id).await?;

        let err = TeamStaffService::new(db)
            .create(
                &intruder,
                CreateTeamStaffParams {
                    team_id: team.id,
                    role: StaffRole::Leader,
                    name: "Wang".to_string(),
                    phone: None,
                    email: None,
                    address: None,
                    line_id: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));

        Ok(())
    }

    /// Tests listing staff filtered by role.
    ///
    /// Expected: Only the coach is returned
    #[tokio::test]
    async fn lists_by_role() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_team_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = factory::create_user(db).await?;
        let team = factory::create_team(db, owner.id).await?;
        factory::create_team_staff(db, team.id, StaffRole::Leader).await?;
        let coach = factory::create_team_staff(db, team.id, StaffRole::Coach).await?;

        let staff = TeamStaffService::new(db)
            .list(&owner, team.id, Some(StaffRole::Coach))
            .await
            .unwrap();

        assert_eq!(staff, vec![coach]);

        Ok(())
    }
}
