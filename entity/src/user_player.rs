use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_player")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub gender: Gender,
    pub birthday: Date,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub ban_until: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// Stored as `M` / `F`, shared by user players and team members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Gender {
    #[sea_orm(string_value = "M")]
    Male,
    #[sea_orm(string_value = "F")]
    Female,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::registration_participant::Entity")]
    RegistrationParticipant,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::registration_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RegistrationParticipant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A ban with a `ban_until` in the past no longer applies.
    pub fn is_banned_at(&self, now: DateTimeUtc) -> bool {
        self.is_banned && self.ban_until.map_or(true, |until| until > now)
    }
}
