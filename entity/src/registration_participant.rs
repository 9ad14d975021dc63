use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "registration_participant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub registration_id: i32,
    pub team_member_id: Option<i32>,
    pub user_player_id: Option<i32>,
    pub is_main_player: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::registration::Entity",
        from = "Column::RegistrationId",
        to = "super::registration::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Registration,
    #[sea_orm(
        belongs_to = "super::team_member::Entity",
        from = "Column::TeamMemberId",
        to = "super::team_member::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TeamMember,
    #[sea_orm(
        belongs_to = "super::user_player::Entity",
        from = "Column::UserPlayerId",
        to = "super::user_player::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    UserPlayer,
}

impl Related<super::registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registration.def()
    }
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMember.def()
    }
}

impl Related<super::user_player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserPlayer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
