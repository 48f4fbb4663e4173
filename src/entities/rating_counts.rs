use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

/// A vote-count snapshot for one external rating.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rating_counts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub film_rating_id: i32,
    pub count_kinopoisk: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::film_ratings::Entity",
        from = "Column::FilmRatingId",
        to = "super::film_ratings::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FilmRatings,
}

impl Related<super::film_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmRatings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::RatingCounts;

    fn id_column() -> Column {
        Column::Id
    }
}
