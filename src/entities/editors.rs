use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "editors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub editor: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::film_editors::Entity")]
    FilmEditors,
}

impl Related<super::film_editors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmEditors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::Editors;

    fn id_column() -> Column {
        Column::Id
    }
}
