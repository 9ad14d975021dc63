use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

use crate::server::{
    data::{
        team::TeamRepository, team_member::TeamMemberRepository, team_staff::TeamStaffRepository,
    },
    error::AppError,
    middleware::auth::Permission,
    model::team::{team_name, TeamSummary},
};

/// Loads a team and checks that `actor` created it.
///
/// # Arguments
/// - `forbidden` - Message returned when the team belongs to someone else
///
/// # Returns
/// - `Ok(team)` - Team owned by `actor`
/// - `Err(AppError::NotFound)` - "隊伍不存在"
/// - `Err(AppError::Forbidden)` - Team owned by another user
pub async fn require_owned_team<C: ConnectionTrait>(
    db: &C,
    actor: &entity::user::Model,
    team_id: i32,
    forbidden: &str,
) -> Result<entity::team::Model, AppError> {
    let Some(team) = TeamRepository::new(db).find_by_id(team_id).await? else {
        return Err(AppError::NotFound("隊伍不存在".to_string()));
    };
    if !Permission::ResourceOwner(team.user_id).allows(actor) {
        return Err(AppError::Forbidden(forbidden.to_string()));
    }
    Ok(team)
}

pub struct TeamService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Teams of `actor`, newest first, each with staff, active members and counts.
    pub async fn list(&self, actor: &entity::user::Model) -> Result<Vec<TeamSummary>, AppError> {
        let teams = TeamRepository::new(self.db).find_by_user(actor.id).await?;

        let mut summaries = Vec::with_capacity(teams.len());
        for team in teams {
            summaries.push(self.summarize(team).await?);
        }
        Ok(summaries)
    }

    /// One team of `actor`. Teams of other users are reported as missing.
    pub async fn get(
        &self,
        actor: &entity::user::Model,
        id: i32,
    ) -> Result<TeamSummary, AppError> {
        let team = TeamRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|team| Permission::ResourceOwner(team.user_id).allows(actor))
            .ok_or_else(|| AppError::NotFound("隊伍不存在".to_string()))?;

        self.summarize(team).await
    }

    pub async fn create(
        &self,
        actor: &entity::user::Model,
        name: &str,
    ) -> Result<entity::team::Model, AppError> {
        let name = team_name(name)?;

        TeamRepository::new(self.db)
            .create(actor.id, name)
            .await
            .map_err(duplicate_name)
    }

    pub async fn rename(
        &self,
        actor: &entity::user::Model,
        id: i32,
        name: &str,
    ) -> Result<entity::team::Model, AppError> {
        let name = team_name(name)?;
        let team = require_owned_team(self.db, actor, id, "沒有權限編輯此隊伍").await?;

        TeamRepository::new(self.db)
            .rename(team, name)
            .await
            .map_err(duplicate_name)
    }

    /// Deletes a team with its members, staff and registrations.
    pub async fn delete(&self, actor: &entity::user::Model, id: i32) -> Result<(), AppError> {
        let team = require_owned_team(self.db, actor, id, "沒有權限編輯此隊伍").await?;

        TeamRepository::new(self.db).delete(team.id).await?;
        tracing::info!("User {} deleted team {}", actor.id, team.id);

        Ok(())
    }

    async fn summarize(&self, team: entity::team::Model) -> Result<TeamSummary, AppError> {
        let team_repo = TeamRepository::new(self.db);

        Ok(TeamSummary {
            staff: TeamStaffRepository::new(self.db)
                .find_by_team(team.id, None)
                .await?,
            members: TeamMemberRepository::new(self.db)
                .find_active_by_team(team.id, Utc::now())
                .await?,
            member_count: team_repo.count_members(team.id).await?,
            registration_count: team_repo.count_registrations(team.id).await?,
            team,
        })
    }
}

fn duplicate_name(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
            AppError::BadRequest("隊伍名稱已存在".to_string())
        }
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    /// Tests that team names are unique across users.
    ///
    /// Expected: Err(BadRequest) "隊伍名稱已存在"
    #[tokio::test]
    async fn rejects_duplicate_name() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_registration_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TeamService::new(db);

        let first = factory::create_user(db).await?;
        let second = factory::create_user(db).await?;

        service.create(&first, "  Tigers ").await.unwrap();
        let err = service.create(&second, "Tigers").await.unwrap_err();

        assert_eq!(err.to_string(), "隊伍名稱已存在");

        Ok(())
    }

    /// Tests that another user's team cannot be renamed or deleted and reads as missing.
    ///
    /// Expected: Forbidden for writes, NotFound for reads
    #[tokio::test]
    async fn other_users_team_is_protected() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_registration_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TeamService::new(db);

        let owner = factory::create_user(db).await?;
        let intruder = factory::create_user(db).await?;
        let team = factory::create_team(db, owner.id).await?;

        let err = service.rename(&intruder, team.id, "Mine").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(err.to_string(), "沒有權限編輯此隊伍");

        let err = service.delete(&intruder, team.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = service.get(&intruder, team.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        Ok(())
    }

    /// Tests the summary: banned members are hidden from the list but counted.
    ///
    /// Expected: One listed member, member count of two
    #[tokio::test]
    async fn summary_hides_banned_members() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_registration_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = factory::create_user(db).await?;
        let team = factory::create_team(db, owner.id).await?;
        factory::create_team_member(db, team.id).await?;
        factory::team_member::TeamMemberFactory::new(db, team.id)
            .banned(true)
            .build()
            .await?;
        factory::create_team_staff(db, team.id, entity::team_staff::StaffRole::Leader).await?;

        let summaries = TeamService::new(db).list(&owner).await.unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].members.len(), 1);
        assert_eq!(summaries[0].member_count, 2);
        assert_eq!(summaries[0].staff.len(), 1);

        Ok(())
    }
}
