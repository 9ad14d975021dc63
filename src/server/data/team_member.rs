//! Team member data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Condition, Expr},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::team::{TeamMemberParams, UpdateTeamMemberParams};

pub struct TeamMemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeamMemberRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::team_member::Model>, DbErr> {
        entity::prelude::TeamMember::find_by_id(id).one(self.db).await
    }

    /// Every member of a team in insertion order.
    pub async fn find_by_team(
        &self,
        team_id: i32,
    ) -> Result<Vec<entity::team_member::Model>, DbErr> {
        entity::prelude::TeamMember::find()
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .order_by_asc(entity::team_member::Column::Id)
            .all(self.db)
            .await
    }

    /// Members of a team whose ban is not in effect at `now`.
    pub async fn find_active_by_team(
        &self,
        team_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<entity::team_member::Model>, DbErr> {
        entity::prelude::TeamMember::find()
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .filter(not_banned_at(now))
            .order_by_asc(entity::team_member::Column::Id)
            .all(self.db)
            .await
    }

    /// Members among `ids` that belong to `team_id` and are not banned at `now`.
    pub async fn find_eligible(
        &self,
        ids: &[i32],
        team_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<entity::team_member::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::TeamMember::find()
            .filter(entity::team_member::Column::Id.is_in(ids.iter().copied()))
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .filter(not_banned_at(now))
            .all(self.db)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<entity::team_member::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::TeamMember::find()
            .filter(entity::team_member::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await
    }

    pub async fn create(
        &self,
        team_id: i32,
        params: TeamMemberParams,
    ) -> Result<entity::team_member::Model, DbErr> {
        let now = Utc::now();
        entity::team_member::ActiveModel {
            team_id: ActiveValue::Set(team_id),
            name: ActiveValue::Set(params.name),
            role: ActiveValue::Set(params.role),
            gender: ActiveValue::Set(params.gender),
            birthday: ActiveValue::Set(params.birthday),
            phone: ActiveValue::Set(params.phone),
            email: ActiveValue::Set(params.email),
            line_id: ActiveValue::Set(params.line_id),
            is_banned: ActiveValue::Set(false),
            ban_reason: ActiveValue::Set(None),
            ban_until: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Applies the fields present in `params`.
    pub async fn update(
        &self,
        member: entity::team_member::Model,
        params: UpdateTeamMemberParams,
    ) -> Result<entity::team_member::Model, DbErr> {
        let mut active = member.into_active_model();

        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(role) = params.role {
            active.role = ActiveValue::Set(role);
        }
        if let Some(gender) = params.gender {
            active.gender = ActiveValue::Set(gender);
        }
        if let Some(birthday) = params.birthday {
            active.birthday = ActiveValue::Set(birthday);
        }
        if let Some(phone) = params.phone {
            active.phone = ActiveValue::Set(phone);
        }
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(email);
        }
        if let Some(line_id) = params.line_id {
            active.line_id = ActiveValue::Set(line_id);
        }
        if let Some(is_banned) = params.is_banned {
            active.is_banned = ActiveValue::Set(is_banned);
        }
        if let Some(ban_reason) = params.ban_reason {
            active.ban_reason = ActiveValue::Set(ban_reason);
        }
        if let Some(ban_until) = params.ban_until {
            active.ban_until = ActiveValue::Set(ban_until);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::TeamMember::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Clears member bans whose `ban_until` has passed.
    pub async fn lift_expired_bans(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::TeamMember::update_many()
            .col_expr(entity::team_member::Column::IsBanned, Expr::value(false))
            .col_expr(
                entity::team_member::Column::BanReason,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::team_member::Column::BanUntil,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .col_expr(entity::team_member::Column::UpdatedAt, Expr::value(now))
            .filter(entity::team_member::Column::IsBanned.eq(true))
            .filter(entity::team_member::Column::BanUntil.is_not_null())
            .filter(entity::team_member::Column::BanUntil.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

/// Matches members that are not banned, or whose ban lapsed before `now`.
fn not_banned_at(now: DateTime<Utc>) -> Condition {
    Condition::any()
        .add(entity::team_member::Column::IsBanned.eq(false))
        .add(
            Condition::all()
                .add(entity::team_member::Column::BanUntil.is_not_null())
                .add(entity::team_member::Column::BanUntil.lte(now)),
        )
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    #[tokio::test]
    async fn eligible_excludes_banned_and_foreign_members() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_team_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = factory::create_user(db).await?;
        let team = factory::create_team(db, owner.id).await?;
        let other_team = factory::create_team(db, owner.id).await?;

        let active = factory::create_team_member(db, team.id).await?;
        let banned = factory::team_member::TeamMemberFactory::new(db, team.id)
            .banned(true)
            .build()
            .await?;
        let lapsed = factory::team_member::TeamMemberFactory::new(db, team.id)
            .banned_until(Utc::now() - Duration::hours(1))
            .build()
            .await?;
        let foreign = factory::create_team_member(db, other_team.id).await?;

        let eligible = TeamMemberRepository::new(db)
            .find_eligible(
                &[active.id, banned.id, lapsed.id, foreign.id],
                team.id,
                Utc::now(),
            )
            .await?;
        let mut ids: Vec<i32> = eligible.iter().map(|m| m.id).collect();
        ids.sort();

        assert_eq!(ids, vec![active.id, lapsed.id]);

        Ok(())
    }

    #[tokio::test]
    async fn lifts_expired_member_bans() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_team_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = factory::create_user(db).await?;
        let team = factory::create_team(db, owner.id).await?;
        let lapsed = factory::team_member::TeamMemberFactory::new(db, team.id)
            .banned_until(Utc::now() - Duration::hours(1))
            .build()
            .await?;
        factory::team_member::TeamMemberFactory::new(db, team.id)
            .banned(true)
            .build()
            .await?;

        let repo = TeamMemberRepository::new(db);

        assert_eq!(repo.lift_expired_bans(Utc::now()).await?, 1);
        assert!(!repo.find_by_id(lapsed.id).await?.unwrap().is_banned);

        Ok(())
    }
}
