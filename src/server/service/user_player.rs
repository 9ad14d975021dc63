use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user_player::UserPlayerRepository,
    error::AppError,
    model::user_player::{CreateUserPlayerParams, UpdateUserPlayerParams, UserPlayerWithCount},
};

pub struct UserPlayerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserPlayerService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Players owned by `actor` with how many registrations each takes part in.
    ///
    /// Players under an active ban are skipped unless `include_banned` is set.
    pub async fn list(
        &self,
        actor: &entity::user::Model,
        include_banned: bool,
    ) -> Result<Vec<UserPlayerWithCount>, AppError> {
        let repo = UserPlayerRepository::new(self.db);

        let players = repo
            .find_by_user(actor.id, include_banned, Utc::now())
            .await?;
        let ids: Vec<i32> = players.iter().map(|p| p.id).collect();
        let counts = repo.participation_counts(&ids).await?;

        Ok(players
            .into_iter()
            .map(|player| UserPlayerWithCount {
                participation_count: counts.get(&player.id).copied().unwrap_or(0),
                player,
            })
            .collect())
    }

    pub async fn create(
        &self,
        params: CreateUserPlayerParams,
    ) -> Result<UserPlayerWithCount, AppError> {
        let player = UserPlayerRepository::new(self.db).create(params).await?;

        Ok(UserPlayerWithCount {
            player,
            participation_count: 0,
        })
    }

    pub async fn update(
        &self,
        actor: &entity::user::Model,
        id: i32,
        params: UpdateUserPlayerParams,
    ) -> Result<UserPlayerWithCount, AppError> {
        let repo = UserPlayerRepository::new(self.db);

        let player = self.find_owned(actor, id).await?;
        let player = repo.update(player, params).await?;
        let counts = repo.participation_counts(&[player.id]).await?;

        Ok(UserPlayerWithCount {
            participation_count: counts.get(&player.id).copied().unwrap_or(0),
            player,
        })
    }

    pub async fn delete(&self, actor: &entity::user::Model, id: i32) -> Result<(), AppError> {
        let player = self.find_owned(actor, id).await?;

        UserPlayerRepository::new(self.db).delete(player.id).await?;

        Ok(())
    }

    async fn find_owned(
        &self,
        actor: &entity::user::Model,
        id: i32,
    ) -> Result<entity::user_player::Model, AppError> {
        UserPlayerRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|player| player.user_id == actor.id)
            .ok_or_else(|| AppError::NotFound("找不到此選手".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sea_orm::DbErr;
    use test_utils::{
        builder::TestBuilder,
        factory::{self, registration::add_player_participant, user_player::UserPlayerFactory},
    };

    use super::*;

    /// Tests listing players with and without banned ones.
    ///
    /// Expected: The banned player only appears with `include_banned`, counts are attached
    #[tokio::test]
    async fn list_hides_banned_players_by_default() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_registration_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = UserPlayerService::new(db);

        let (user, game, category) = factory::helpers::create_open_game_for_user(db).await?;
        let active = factory::create_user_player(db, user.id).await?;
        UserPlayerFactory::new(db, user.id)
            .banned(Some(Utc::now() + Duration::days(3)))
            .build()
            .await?;

        let registration = factory::create_registration(db, game.id, category.id, user.id).await?;
        add_player_participant(db, registration.id, active.id, true).await?;

        let visible = service.list(&user, false).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].player.id, active.id);
        assert_eq!(visible[0].participation_count, 1);

        let all = service.list(&user, true).await.unwrap();
        assert_eq!(all.len(), 2);

        Ok(())
    }

    /// Tests that another user's player cannot be touched.
    ///
    /// Expected: Err(NotFound) "找不到此選手"
    #[tokio::test]
    async fn other_users_player_is_not_found() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_registration_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = UserPlayerService::new(db);

        let owner = factory::create_user(db).await?;
        let intruder = factory::create_user(db).await?;
        let player = factory::create_user_player(db, owner.id).await?;

        let err = service.delete(&intruder, player.id).await.unwrap_err();
        assert_eq!(err.to_string(), "找不到此選手");

        let err = service
            .update(&intruder, player.id, UpdateUserPlayerParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        Ok(())
    }

    /// Tests banning and unbanning a player.
    ///
    /// Expected: Ban fields are set, then cleared on unban
    #[tokio::test]
    async fn ban_and_unban() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_registration_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = UserPlayerService::new(db);

        let owner = factory::create_user(db).await?;
        let player = factory::create_user_player(db, owner.id).await?;
        let until = Utc::now() + Duration::days(7);

        let banned = service
            .update(
                &owner,
                player.id,
                UpdateUserPlayerParams {
                    is_banned: Some(true),
                    ban_reason: Some(Some("Late".to_string())),
                    ban_until: Some(Some(until)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(banned.player.is_banned);
        assert!(banned.player.ban_until.is_some());

        let lifted = service
            .update(
                &owner,
                player.id,
                UpdateUserPlayerParams {
                    is_banned: Some(false),
                    ban_reason: Some(None),
                    ban_until: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!lifted.player.is_banned);
        assert_eq!(lifted.player.ban_reason, None);

        Ok(())
    }
}
