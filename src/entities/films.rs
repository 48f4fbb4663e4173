use sea_orm::entity::prelude::*;

use crate::schema::{CatalogEntity, Table};

/// One movie. Only `time` (the runtime) is mandatory; every monetary and date
/// column stays `None` until the value is known.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "films")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub year_create: Option<Date>,
    pub budget: Option<Decimal>,
    pub marketing: Option<Decimal>,
    pub fees_usa: Option<Decimal>,
    pub fees_ru: Option<Decimal>,
    pub fees_world: Option<Decimal>,
    pub premier_russia: Option<Date>,
    pub premier_world: Option<Date>,
    pub age_id: Option<i32>,
    pub rating_mpaa_id: Option<i32>,
    pub time: Time,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ages::Entity",
        from = "Column::AgeId",
        to = "super::ages::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Ages,
    #[sea_orm(
        belongs_to = "super::ratings_mpaa::Entity",
        from = "Column::RatingMpaaId",
        to = "super::ratings_mpaa::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RatingsMpaa,
    #[sea_orm(has_many = "super::film_names::Entity")]
    FilmNames,
    #[sea_orm(has_many = "super::film_ratings::Entity")]
    FilmRatings,
    #[sea_orm(has_many = "super::films_with_index_sites::Entity")]
    FilmsWithIndexSites,
}

impl Related<super::ages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ages.def()
    }
}

impl Related<super::ratings_mpaa::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RatingsMpaa.def()
    }
}

impl Related<super::film_names::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmNames.def()
    }
}

impl Related<super::film_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmRatings.def()
    }
}

impl Related<super::films_with_index_sites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmsWithIndexSites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    const TABLE: Table = Table::Films;

    fn id_column() -> Column {
        Column::Id
    }
}
