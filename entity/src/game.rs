use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub region: String,
    pub venue: String,
    pub address: String,
    pub signup_start: DateTimeUtc,
    pub signup_end: DateTimeUtc,
    pub game_start: DateTimeUtc,
    pub game_end: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::game_detail::Entity")]
    GameDetail,
    #[sea_orm(has_many = "super::game_category::Entity")]
    GameCategory,
    #[sea_orm(has_many = "super::game_fee::Entity")]
    GameFee,
    #[sea_orm(has_many = "super::registration::Entity")]
    Registration,
}

impl Related<super::game_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameDetail.def()
    }
}

impl Related<super::game_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameCategory.def()
    }
}

impl Related<super::game_fee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameFee.def()
    }
}

impl Related<super::registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
