use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::user::StatsDto,
    server::{
        data::{game::GameRepository, user::UserRepository},
        error::AppError,
    },
};

pub struct StatsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Dashboard counters. Monthly registrations are users created since the first day of
    /// the current UTC month.
    pub async fn get(&self) -> Result<StatsDto, AppError> {
        let user_repo = UserRepository::new(self.db);

        let today = Utc::now().date_naive();
        let month_start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| AppError::InternalError("Invalid month start".to_string()))?;

        Ok(StatsDto {
            games_count: GameRepository::new(self.db).count().await?,
            users_count: user_repo.count().await?,
            monthly_registrations: user_repo.count_created_since(month_start).await?,
        })
    }
}
