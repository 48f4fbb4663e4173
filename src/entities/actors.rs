use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "actors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub actor: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::film_actors::Entity")]
    FilmActors,
}

impl Related<super::film_actors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmActors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::Actors;

    fn id_column() -> Column {
        Column::Id
    }
}
