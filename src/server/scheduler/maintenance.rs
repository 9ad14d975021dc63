use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{
        password_reset_token::PasswordResetTokenRepository, team_member::TeamMemberRepository,
        user::UserRepository, user_player::UserPlayerRepository,
    },
    error::AppError,
};

/// Every ten minutes, on the minute.
const MAINTENANCE_SCHEDULE: &str = "0 */10 * * * *";

/// Rows touched by one maintenance run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub users_unbanned: u64,
    pub members_unbanned: u64,
    pub players_unbanned: u64,
    pub reset_tokens_deleted: u64,
}

/// Starts the maintenance scheduler
///
/// The job lifts bans whose expiry has passed (users, team members and players) and
/// deletes expired password reset tokens. Failures are logged and retried on the next tick.
///
/// # Arguments
/// - `db`: Database connection
///
/// # Returns
/// The running scheduler. Dropping it does not stop the job.
pub async fn start_scheduler(db: DatabaseConnection) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(MAINTENANCE_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            match run_maintenance(&db, Utc::now()).await {
                Ok(report) if report != MaintenanceReport::default() => {
                    tracing::info!(?report, "Maintenance run finished");
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Error running maintenance: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(scheduler)
}

/// Runs one maintenance pass as of `now`.
pub async fn run_maintenance(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<MaintenanceReport, AppError> {
    Ok(MaintenanceReport {
        users_unbanned: UserRepository::new(db).lift_expired_bans(now).await?,
        members_unbanned: TeamMemberRepository::new(db).lift_expired_bans(now).await?,
        players_unbanned: UserPlayerRepository::new(db).lift_expired_bans(now).await?,
        reset_tokens_deleted: PasswordResetTokenRepository::new(db)
            .delete_expired(now)
            .await?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sea_orm::{DbErr, EntityTrait};
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    /// Tests expired bans are lifted and active ones kept.
    ///
    /// Expected: one user, one member and one player unbanned
    #[tokio::test]
    async fn lifts_expired_bans() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let now = Utc::now();

        let expired_user = factory::user::UserFactory::new(db)
            .banned(Some(now - Duration::minutes(5)))
            .build()
            .await?;
        let permanent_user = factory::user::UserFactory::new(db)
            .banned(None)
            .build()
            .await?;
        let team = factory::create_team(db, expired_user.id).await?;
        factory::team_member::TeamMemberFactory::new(db, team.id)
            .banned(true)
            .banned_until(now - Duration::days(1))
            .build()
            .await?;
        factory::team_member::TeamMemberFactory::new(db, team.id)
            .banned(true)
            .banned_until(now + Duration::days(1))
            .build()
            .await?;
        let player = factory::user_player::UserPlayerFactory::new(db, expired_user.id)
            .banned(Some(now - Duration::seconds(1)))
            .build()
            .await?;

        let report = run_maintenance(db, now).await.unwrap();

        assert_eq!(report.users_unbanned, 1);
        assert_eq!(report.members_unbanned, 1);
        assert_eq!(report.players_unbanned, 1);

        let user = entity::prelude::User::find_by_id(expired_user.id)
            .one(db)
            .await?
            .unwrap();
        assert!(!user.banned);
        assert!(user.ban_expires.is_none());

        let still_banned = entity::prelude::User::find_by_id(permanent_user.id)
            .one(db)
            .await?
            .unwrap();
        assert!(still_banned.banned);

        let player = entity::prelude::UserPlayer::find_by_id(player.id)
            .one(db)
            .await?
            .unwrap();
        assert!(!player.is_banned);

        Ok(())
    }

    /// Tests a second run right after the first has nothing left to do.
    ///
    /// Expected: empty report
    #[tokio::test]
    async fn idle_run_reports_nothing() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        factory::create_user(db).await?;

        let report = run_maintenance(db, Utc::now()).await.unwrap();

        assert_eq!(report, MaintenanceReport::default());

        Ok(())
    }
}
