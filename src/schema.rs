//! Schema registry for the film catalog.
//!
//! The registry describes every table the catalog stores: what kind of table it
//! is, which columns are mandatory and which foreign keys point out of it. It is
//! built once when a [`Catalog`](crate::db::Catalog) is opened and shared by
//! reference; validation and cascade planning read it instead of inspecting the
//! sea-orm entities at runtime.

use std::fmt;
use std::str::FromStr;

use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};

/// Ties a sea-orm entity to its registry entry.
pub trait CatalogEntity: EntityTrait {
    const TABLE: Table;

    fn id_column() -> Self::Column;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Table {
    Users,
    Tests,
    Films,
    FilmsWithIndexSites,
    FilmNames,
    Countries,
    FilmCountries,
    Ages,
    RatingsMpaa,
    Genres,
    FilmGenres,
    Actors,
    FilmActors,
    Keywords,
    FilmKeywords,
    FilmRatings,
    RatingCounts,
    Screenwriters,
    FilmScreenwriters,
    Producers,
    FilmProducers,
    StageDirectors,
    FilmStageDirectors,
    Operators,
    FilmOperators,
    Composers,
    FilmComposers,
    Painters,
    FilmPainters,
    Editors,
    FilmEditors,
}

impl Table {
    /// Every table, in declaration order. Registry entries use the same order.
    pub const ALL: [Self; 31] = [
        Self::Users,
        Self::Tests,
        Self::Films,
        Self::FilmsWithIndexSites,
        Self::FilmNames,
        Self::Countries,
        Self::FilmCountries,
        Self::Ages,
        Self::RatingsMpaa,
        Self::Genres,
        Self::FilmGenres,
        Self::Actors,
        Self::FilmActors,
        Self::Keywords,
        Self::FilmKeywords,
        Self::FilmRatings,
        Self::RatingCounts,
        Self::Screenwriters,
        Self::FilmScreenwriters,
        Self::Producers,
        Self::FilmProducers,
        Self::StageDirectors,
        Self::FilmStageDirectors,
        Self::Operators,
        Self::FilmOperators,
        Self::Composers,
        Self::FilmComposers,
        Self::Painters,
        Self::FilmPainters,
        Self::Editors,
        Self::FilmEditors,
    ];

    /// Name of the persisted table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Tests => "tests",
            Self::Films => "films",
            Self::FilmsWithIndexSites => "films_with_index_sites",
            Self::FilmNames => "film_names",
            Self::Countries => "country",
            Self::FilmCountries => "film_country",
            Self::Ages => "ages",
            Self::RatingsMpaa => "ratings_mpaa",
            Self::Genres => "genres",
            Self::FilmGenres => "film_genres",
            Self::Actors => "actors",
            Self::FilmActors => "film_actors",
            Self::Keywords => "keywords",
            Self::FilmKeywords => "film_keywords",
            Self::FilmRatings => "film_ratings",
            Self::RatingCounts => "rating_counts",
            Self::Screenwriters => "screenwriters",
            Self::FilmScreenwriters => "film_screenwriters",
            Self::Producers => "producers",
            Self::FilmProducers => "film_producers",
            Self::StageDirectors => "stage_directors",
            Self::FilmStageDirectors => "film_stage_directors",
            Self::Operators => "operators",
            Self::FilmOperators => "film_operators",
            Self::Composers => "composers",
            Self::FilmComposers => "film_composers",
            Self::Painters => "painters",
            Self::FilmPainters => "film_painters",
            Self::Editors => "editors",
            Self::FilmEditors => "film_editors",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTable(pub String);

impl fmt::Display for UnknownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown table '{}'", self.0)
    }
}

impl std::error::Error for UnknownTable {}

impl FromStr for Table {
    type Err = UnknownTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.name() == s)
            .ok_or_else(|| UnknownTable(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Films, users and tests.
    Core,
    /// Rows owned by a single parent: names, ratings, index-site ids.
    Attribute,
    /// Pure many-to-many link between a film and a lookup row.
    Join,
    /// Shared reference data (genres, countries, crew members, age ratings).
    Lookup,
}

/// What deleting a still-referenced lookup row does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupDeletePolicy {
    /// Refuse with a conflict and leave everything in place.
    #[default]
    Restrict,
    /// Remove every referencing row, transitively.
    Cascade,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references: Table,
    pub required: bool,
}

impl ForeignKey {
    const fn required(column: &'static str, references: Table) -> Self {
        Self {
            column,
            references,
            required: true,
        }
    }

    const fn optional(column: &'static str, references: Table) -> Self {
        Self {
            column,
            references,
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub table: Table,
    pub kind: TableKind,
    /// Mandatory columns that are not foreign keys.
    pub required: &'static [&'static str],
    pub foreign_keys: Vec<ForeignKey>,
}

/// The film-to-lookup link tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JoinTable {
    Countries,
    Genres,
    Actors,
    Keywords,
    Screenwriters,
    Producers,
    StageDirectors,
    Operators,
    Composers,
    Painters,
    Editors,
}

impl JoinTable {
    pub const ALL: [Self; 11] = [
        Self::Countries,
        Self::Genres,
        Self::Actors,
        Self::Keywords,
        Self::Screenwriters,
        Self::Producers,
        Self::StageDirectors,
        Self::Operators,
        Self::Composers,
        Self::Painters,
        Self::Editors,
    ];

    /// The link table itself.
    #[must_use]
    pub const fn table(self) -> Table {
        match self {
            Self::Countries => Table::FilmCountries,
            Self::Genres => Table::FilmGenres,
            Self::Actors => Table::FilmActors,
            Self::Keywords => Table::FilmKeywords,
            Self::Screenwriters => Table::FilmScreenwriters,
            Self::Producers => Table::FilmProducers,
            Self::StageDirectors => Table::FilmStageDirectors,
            Self::Operators => Table::FilmOperators,
            Self::Composers => Table::FilmComposers,
            Self::Painters => Table::FilmPainters,
            Self::Editors => Table::FilmEditors,
        }
    }

    /// The lookup table the link points at.
    #[must_use]
    pub const fn lookup(self) -> Table {
        match self {
            Self::Countries => Table::Countries,
            Self::Genres => Table::Genres,
            Self::Actors => Table::Actors,
            Self::Keywords => Table::Keywords,
            Self::Screenwriters => Table::Screenwriters,
            Self::Producers => Table::Producers,
            Self::StageDirectors => Table::StageDirectors,
            Self::Operators => Table::Operators,
            Self::Composers => Table::Composers,
            Self::Painters => Table::Painters,
            Self::Editors => Table::Editors,
        }
    }

    /// Foreign-key column in the link table that targets the lookup row.
    #[must_use]
    pub const fn lookup_key(self) -> &'static str {
        match self {
            Self::Countries => "country_id",
            Self::Genres => "genre_id",
            Self::Actors => "actor_id",
            Self::Keywords => "keyword_id",
            Self::Screenwriters => "screenwriter_id",
            Self::Producers => "producer_id",
            Self::StageDirectors => "stage_director_id",
            Self::Operators => "operator_id",
            Self::Composers => "composer_id",
            Self::Painters => "painter_id",
            Self::Editors => "editor_id",
        }
    }

    /// Text column holding the lookup row's label.
    #[must_use]
    pub const fn label_column(self) -> &'static str {
        match self {
            Self::Countries => "name",
            Self::Genres => "genre",
            Self::Actors => "actor",
            Self::Keywords => "keyword",
            Self::Screenwriters => "screenwriter",
            Self::Producers => "producer",
            Self::StageDirectors => "stage_director",
            Self::Operators => "operator",
            Self::Composers => "composer",
            Self::Painters => "painter",
            Self::Editors => "editor",
        }
    }

    #[must_use]
    pub fn from_table(table: Table) -> Option<Self> {
        Self::ALL.into_iter().find(|join| join.table() == table)
    }
}

#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    tables: Vec<TableDef>,
    lookup_policy: LookupDeletePolicy,
}

impl SchemaRegistry {
    /// Registry for the film catalog tables.
    #[must_use]
    pub fn film_catalog(lookup_policy: LookupDeletePolicy) -> Self {
        let tables = Table::ALL.into_iter().map(Self::define).collect();
        Self {
            tables,
            lookup_policy,
        }
    }

    fn define(table: Table) -> TableDef {
        if let Some(join) = JoinTable::from_table(table) {
            return TableDef {
                table,
                kind: TableKind::Join,
                required: &[],
                foreign_keys: vec![
                    ForeignKey::required("film_id", Table::Films),
                    ForeignKey::required(join.lookup_key(), join.lookup()),
                ],
            };
        }

        let (kind, required, foreign_keys): (_, &'static [&'static str], _) = match table {
            Table::Users => (
                TableKind::Core,
                &["name", "age", "sex"],
                vec![
                    ForeignKey::optional("test_id", Table::Tests),
                    ForeignKey::optional("watched_id", Table::Films),
                    ForeignKey::optional("recommended_id", Table::Films),
                ],
            ),
            Table::Tests => (TableKind::Core, &["name", "result"], vec![]),
            Table::Films => (
                TableKind::Core,
                &["time"],
                vec![
                    ForeignKey::optional("age_id", Table::Ages),
                    ForeignKey::optional("rating_mpaa_id", Table::RatingsMpaa),
                ],
            ),
            Table::FilmsWithIndexSites => (
                TableKind::Attribute,
                &["kinopoisk_id"],
                vec![ForeignKey::required("film_id", Table::Films)],
            ),
            Table::FilmNames | Table::FilmRatings => (
                TableKind::Attribute,
                &[],
                vec![ForeignKey::required("film_id", Table::Films)],
            ),
            Table::RatingCounts => (
                TableKind::Attribute,
                &[],
                vec![ForeignKey::required("film_rating_id", Table::FilmRatings)],
            ),
            _ => (TableKind::Lookup, &[], vec![]),
        };

        TableDef {
            table,
            kind,
            required,
            foreign_keys,
        }
    }

    #[must_use]
    pub fn table(&self, table: Table) -> &TableDef {
        &self.tables[table as usize]
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.tables.iter()
    }

    /// Every `(child table, foreign key)` pair whose key targets `parent`.
    pub fn dependents(&self, parent: Table) -> impl Iterator<Item = (&TableDef, &ForeignKey)> {
        self.tables.iter().flat_map(move |def| {
            def.foreign_keys
                .iter()
                .filter(move |fk| fk.references == parent)
                .map(move |fk| (def, fk))
        })
    }

    #[must_use]
    pub const fn lookup_policy(&self) -> LookupDeletePolicy {
        self.lookup_policy
    }

    /// Whether deleting a referenced row of `table` must be refused.
    #[must_use]
    pub fn restricts_delete(&self, table: Table) -> bool {
        self.table(table).kind == TableKind::Lookup
            && self.lookup_policy == LookupDeletePolicy::Restrict
    }
}
