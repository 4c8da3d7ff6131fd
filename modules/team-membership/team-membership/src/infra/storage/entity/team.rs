use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub category: String,
    pub status: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::player_team::Entity")]
    PlayerTeam,
    #[sea_orm(has_many = "super::coach_team::Entity")]
    CoachTeam,
    #[sea_orm(has_many = "super::join_request::Entity")]
    JoinRequest,
}

impl Related<super::player_team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerTeam.def()
    }
}

impl Related<super::coach_team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoachTeam.def()
    }
}

impl Related<super::join_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JoinRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
