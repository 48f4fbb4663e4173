use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stage_directors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub stage_director: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::film_stage_directors::Entity")]
    FilmStageDirectors,
}

impl Related<super::film_stage_directors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmStageDirectors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::StageDirectors;

    fn id_column() -> Column {
        Column::Id
    }
}
