use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::team_member::TeamMemberRepository,
    error::AppError,
    model::team::{TeamMemberParams, UpdateTeamMemberParams},
    service::team::require_owned_team,
};

const FORBIDDEN: &str = "沒有權限操作此隊伍";

pub struct TeamMemberService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamMemberService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every member of a team owned by `actor`, banned ones included.
    pub async fn list(
        &self,
        actor: &entity::user::Model,
        team_id: i32,
    ) -> Result<Vec<entity::team_member::Model>, AppError> {
        let team = require_owned_team(self.db, actor, team_id, FORBIDDEN).await?;

        Ok(TeamMemberRepository::new(self.db)
            .find_by_team(team.id)
            .await?)
    }

    pub async fn create(
        &self,
        actor: &entity::user::Model,
        team_id: i32,
        params: TeamMemberParams,
    ) -> Result<entity::team_member::Model, AppError> {
        let team = require_owned_team(self.db, actor, team_id, FORBIDDEN).await?;

        Ok(TeamMemberRepository::new(self.db)
            .create(team.id, params)
            .await?)
    }

    /// Adds several members at once. Either all are inserted or none.
    pub async fn create_batch(
        &self,
        actor: &entity::user::Model,
        team_id: i32,
        members: Vec<TeamMemberParams>,
    ) -> Result<Vec<entity::team_member::Model>, AppError> {
        if members.is_empty() {
            return Err(AppError::BadRequest(
                "請提供有效的隊伍 ID 和成員資料".to_string(),
            ));
        }

        let txn = self.db.begin().await?;
        let team = require_owned_team(&txn, actor, team_id, FORBIDDEN).await?;

        let repo = TeamMemberRepository::new(&txn);
        let mut created = Vec::with_capacity(members.len());
        for member in members {
            created.push(repo.create(team.id, member).await?);
        }

        txn.commit().await?;

        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &entity::user::Model,
        id: i32,
        params: UpdateTeamMemberParams,
    ) -> Result<entity::team_member::Model, AppError> {
        let member = self.find_owned(actor, id).await?;

        Ok(TeamMemberRepository::new(self.db)
            .update(member, params)
            .await?)
    }

    pub async fn delete(&self, actor: &entity::user::Model, id: i32) -> Result<(), AppError> {
        let member = self.find_owned(actor, id).await?;

        TeamMemberRepository::new(self.db).delete(member.id).await?;

        Ok(())
    }

    async fn find_owned(
        &self,
        actor: &entity::user::Model,
        id: i32,
    ) -> Result<entity::team_member::Model, AppError> {
        let member = TeamMemberRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("隊員不存在".to_string()))?;

        require_owned_team(self.db, actor, member.team_id, FORBIDDEN).await?;

        Ok(member)
    }
}
