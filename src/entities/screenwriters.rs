use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "screenwriters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub screenwriter: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::film_screenwriters::Entity")]
    FilmScreenwriters,
}

impl Related<super::film_screenwriters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmScreenwriters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::Screenwriters;

    fn id_column() -> Column {
        Column::Id
    }
}
