use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub age: i32,

    pub sex: String,

    /// The quiz this user took, if any.
    pub test_id: Option<i32>,

    pub watched_id: Option<i32>,

    /// Filled in by the recommender; the catalog only stores the link.
    pub recommended_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tests::Entity",
        from = "Column::TestId",
        to = "super::tests::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Tests,
    #[sea_orm(
        belongs_to = "super::films::Entity",
        from = "Column::WatchedId",
        to = "super::films::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    WatchedFilm,
    #[sea_orm(
        belongs_to = "super::films::Entity",
        from = "Column::RecommendedId",
        to = "super::films::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RecommendedFilm,
}

impl Related<super::tests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::Users;

    fn id_column() -> Column {
        Column::Id
    }
}
