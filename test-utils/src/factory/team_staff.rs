//! Team staff factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::team_staff::StaffRole;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a staff entry for `team_id` with the given role.
pub async fn create_team_staff(
    db: &DatabaseConnection,
    team_id: i32,
    role: StaffRole,
) -> Result<entity::team_staff::Model, DbErr> {
    let now = Utc::now();
    entity::team_staff::ActiveModel {
        team_id: ActiveValue::Set(team_id),
        role: ActiveValue::Set(role),
        name: ActiveValue::Set(format!("Staff {}", next_id())),
        phone: ActiveValue::Set(None),
        email: ActiveValue::Set(None),
        address: ActiveValue::Set(None),
        line_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
