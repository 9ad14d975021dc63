use sea_orm::entity::prelude::*;

use crate::user_player::Gender;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "team_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub team_id: i32,
    pub name: String,
    pub role: String,
    pub gender: Gender,
    pub birthday: Date,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub line_id: Option<String>,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub ban_until: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Team,
    #[sea_orm(has_many = "super::registration_participant::Entity")]
    RegistrationParticipant,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::registration_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RegistrationParticipant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_banned_at(&self, now: DateTimeUtc) -> bool {
        self.is_banned && self.ban_until.map_or(true, |until| until > now)
    }
}
