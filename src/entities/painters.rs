use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "painters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub painter: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::film_painters::Entity")]
    FilmPainters,
}

impl Related<super::film_painters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmPainters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::Painters;

    fn id_column() -> Column {
        Column::Id
    }
}
