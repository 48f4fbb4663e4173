use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub age: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::films::Entity")]
    Films,
}

impl Related<super::films::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Films.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::Ages;

    fn id_column() -> Column {
        Column::Id
    }
}
