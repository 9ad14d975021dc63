use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game_fee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub game_id: i32,
    pub category_id: Option<i32>,
    pub fee_type: String,
    pub description: Option<String>,
    pub amount: i32,
    pub is_required: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game::Entity",
        from = "Column::GameId",
        to = "super::game::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Game,
    #[sea_orm(
        belongs_to = "super::game_category::Entity",
        from = "Column::CategoryId",
        to = "super::game_category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    GameCategory,
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::game_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
