use std::collections::BTreeMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait, QueryFilter, QueryOrder,
};

use super::{Catalog, LookupEntry};
use crate::entities::{
    ages, film_names, film_ratings, films, films_with_index_sites, prelude::*, rating_counts,
    ratings_mpaa, users,
};
use crate::error::CatalogError;
use crate::schema::JoinTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingWithCounts {
    pub rating: film_ratings::Model,
    pub counts: Vec<rating_counts::Model>,
}

/// A film together with everything attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmDetails {
    pub film: films::Model,
    pub names: Vec<film_names::Model>,
    pub index_sites: Vec<films_with_index_sites::Model>,
    pub age: Option<ages::Model>,
    pub rating_mpaa: Option<ratings_mpaa::Model>,
    pub ratings: Vec<RatingWithCounts>,
    pub links: BTreeMap<JoinTable, Vec<LookupEntry>>,
}

impl FilmDetails {
    /// Lookup rows linked through `join`; empty when there are none.
    #[must_use]
    pub fn linked(&self, join: JoinTable) -> &[LookupEntry] {
        self.links.get(&join).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn kinopoisk_ids(&self) -> Vec<i32> {
        self.index_sites.iter().map(|site| site.kinopoisk_id).collect()
    }
}

/// Read-side helpers for films, built on the same connection as the catalog.
pub struct FilmRepository {
    catalog: Catalog,
    conn: DatabaseConnection,
}

impl FilmRepository {
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            catalog: catalog.clone(),
            conn: catalog.conn().clone(),
        }
    }

    pub async fn details(&self, film_id: i32) -> Result<FilmDetails, CatalogError> {
        let film = self.catalog.get::<films::Entity>(film_id).await?;

        let names = FilmNames::find()
            .filter(film_names::Column::FilmId.eq(film_id))
            .order_by_asc(film_names::Column::Id)
            .all(&self.conn)
            .await?;

        let index_sites = FilmsWithIndexSites::find()
            .filter(films_with_index_sites::Column::FilmId.eq(film_id))
            .order_by_asc(films_with_index_sites::Column::Id)
            .all(&self.conn)
            .await?;

        let age = film.find_related(Ages).one(&self.conn).await?;
        let rating_mpaa = film.find_related(RatingsMpaa).one(&self.conn).await?;
        let ratings = self.ratings(film_id).await?;

        let mut links = BTreeMap::new();
        for join in JoinTable::ALL {
            let entries = self.catalog.list_joined(film_id, join).await?;
            if !entries.is_empty() {
                links.insert(join, entries);
            }
        }

        Ok(FilmDetails {
            film,
            names,
            index_sites,
            age,
            rating_mpaa,
            ratings,
            links,
        })
    }

    /// External ratings of a film, each with its vote-count snapshots.
    pub async fn ratings(&self, film_id: i32) -> Result<Vec<RatingWithCounts>, CatalogError> {
        let ratings = FilmRatings::find()
            .filter(film_ratings::Column::FilmId.eq(film_id))
            .order_by_asc(film_ratings::Column::Id)
            .all(&self.conn)
            .await?;
        let counts = ratings.load_many(RatingCounts, &self.conn).await?;

        Ok(ratings
            .into_iter()
            .zip(counts)
            .map(|(rating, counts)| RatingWithCounts { rating, counts })
            .collect())
    }

    pub async fn viewers(&self, film_id: i32) -> Result<Vec<users::Model>, CatalogError> {
        self.users_where(users::Column::WatchedId, film_id).await
    }

    /// Users the recommender pointed at this film.
    pub async fn recommended_to(&self, film_id: i32) -> Result<Vec<users::Model>, CatalogError> {
        self.users_where(users::Column::RecommendedId, film_id).await
    }

    async fn users_where(
        &self,
        column: users::Column,
        film_id: i32,
    ) -> Result<Vec<users::Model>, CatalogError> {
        Ok(Users::find()
            .filter(column.eq(film_id))
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?)
    }
}
