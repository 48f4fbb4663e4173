use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "composers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub composer: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::film_composers::Entity")]
    FilmComposers,
}

impl Related<super::film_composers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmComposers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::Composers;

    fn id_column() -> Column {
        Column::Id
    }
}
