use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "country")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::film_country::Entity")]
    FilmCountries,
}

impl Related<super::film_country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmCountries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::Countries;

    fn id_column() -> Column {
        Column::Id
    }
}
