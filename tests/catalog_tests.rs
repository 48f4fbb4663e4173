use chrono::{NaiveDate, NaiveTime};
use filmnet::entities::{
    actors, ages, country, film_actors, film_country, film_genres, film_names, film_ratings,
    films, films_with_index_sites, genres, keywords, rating_counts, ratings_mpaa, tests, users,
};
use filmnet::{Catalog, CatalogError, JoinTable, LookupDeletePolicy, Table};
use filmnet::db::FilmRepository;
use sea_orm::prelude::Decimal;
use sea_orm::{NotSet, Set};

async fn open_catalog() -> Catalog {
    Catalog::in_memory(LookupDeletePolicy::Restrict)
        .await
        .expect("failed to open in-memory catalog")
}

fn runtime(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

async fn bare_film(catalog: &Catalog) -> films::Model {
    catalog
        .create(films::ActiveModel {
            time: Set(runtime(1, 50)),
            ..Default::default()
        })
        .await
        .expect("failed to create film")
}

async fn genre(catalog: &Catalog, name: &str) -> genres::Model {
    catalog
        .create(genres::ActiveModel {
            genre: Set(Some(name.to_string())),
            ..Default::default()
        })
        .await
        .expect("failed to create genre")
}

#[tokio::test]
async fn film_country_link_disappears_with_film_but_country_stays() {
    let catalog = open_catalog().await;

    let usa = catalog
        .create(country::ActiveModel {
            name: Set(Some("USA".to_string())),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(usa.id, 1);

    let film = bare_film(&catalog).await;
    let link = catalog
        .create(film_country::ActiveModel {
            film_id: Set(film.id),
            country_id: Set(usa.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(link.id, 1);

    catalog.delete::<films::Entity>(film.id).await.unwrap();

    let err = catalog
        .get::<film_country::Entity>(link.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    let still_there = catalog.get::<country::Entity>(usa.id).await.unwrap();
    assert_eq!(still_there.name.as_deref(), Some("USA"));
}

#[tokio::test]
async fn user_keeps_reference_to_taken_test() {
    let catalog = open_catalog().await;

    let quiz = catalog
        .create(tests::ActiveModel {
            name: Set("preference quiz".to_string()),
            result: Set("action".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let ann = catalog
        .create(users::ActiveModel {
            name: Set("Ann".to_string()),
            age: Set(30),
            sex: Set("F".to_string()),
            test_id: Set(Some(quiz.id)),
            ..Default::default()
        })
        .await
        .unwrap();

    let fetched = catalog.get::<users::Entity>(ann.id).await.unwrap();
    assert_eq!(fetched.test_id, Some(quiz.id));
    assert_eq!(fetched.watched_id, None);
    assert_eq!(fetched.recommended_id, None);
}

#[tokio::test]
async fn film_round_trip_preserves_every_attribute() {
    let catalog = open_catalog().await;

    let age = catalog
        .create(ages::ActiveModel {
            age: Set(Some(16)),
            ..Default::default()
        })
        .await
        .unwrap();
    let mpaa = catalog
        .create(ratings_mpaa::ActiveModel {
            rating_mpaa: Set(Some("PG-13".to_string())),
            ..Default::default()
        })
        .await
        .unwrap();

    let created = catalog
        .create(films::ActiveModel {
            year_create: Set(NaiveDate::from_ymd_opt(2010, 1, 1)),
            budget: Set(Some(Decimal::new(16_000_000_050, 2))),
            marketing: Set(Some(Decimal::new(1_000_000_025, 2))),
            fees_usa: Set(Some(Decimal::new(29_257_652_150, 2))),
            fees_ru: Set(None),
            fees_world: Set(Some(Decimal::new(83_653_270_075, 2))),
            premier_russia: Set(NaiveDate::from_ymd_opt(2010, 7, 22)),
            premier_world: Set(NaiveDate::from_ymd_opt(2010, 7, 8)),
            age_id: Set(Some(age.id)),
            rating_mpaa_id: Set(Some(mpaa.id)),
            time: Set(NaiveTime::from_hms_opt(2, 28, 0).unwrap()),
            ..Default::default()
        })
        .await
        .unwrap();

    let fetched = catalog.get::<films::Entity>(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.budget, Some(Decimal::new(16_000_000_050, 2)));
    assert_eq!(fetched.fees_ru, None);
    assert_eq!(fetched.time, NaiveTime::from_hms_opt(2, 28, 0).unwrap());
    assert_eq!(fetched.age_id, Some(age.id));
}

#[tokio::test]
async fn unknown_values_stay_unset_rather_than_zero() {
    let catalog = open_catalog().await;
    let film = bare_film(&catalog).await;

    let fetched = catalog.get::<films::Entity>(film.id).await.unwrap();
    assert_eq!(fetched.budget, None);
    assert_eq!(fetched.fees_world, None);
    assert_eq!(fetched.premier_world, None);
    assert_eq!(fetched.age_id, None);
}

#[tokio::test]
async fn film_without_runtime_is_rejected() {
    let catalog = open_catalog().await;

    let err = catalog
        .create(films::ActiveModel {
            budget: Set(Some(Decimal::new(100, 0))),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Validation {
            table: Table::Films,
            column: "time"
        }
    ));
    assert_eq!(catalog.count(Table::Films).await.unwrap(), 0);
}

#[tokio::test]
async fn user_requires_name_age_and_sex() {
    let catalog = open_catalog().await;

    let err = catalog
        .create(users::ActiveModel {
            name: Set("Bob".to_string()),
            sex: Set("M".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Validation {
            table: Table::Users,
            column: "age"
        }
    ));
}

#[tokio::test]
async fn dangling_film_genre_is_rejected_and_table_unchanged() {
    let catalog = open_catalog().await;
    let drama = genre(&catalog, "drama").await;

    let err = catalog
        .create(film_genres::ActiveModel {
            film_id: Set(42),
            genre_id: Set(drama.id),
            ..Default::default()
        })
        .await
        .unwrap_err();

    match err {
        CatalogError::ReferentialIntegrity {
            table,
            column,
            references,
            id,
        } => {
            assert_eq!(table, Table::FilmGenres);
            assert_eq!(column, "film_id");
            assert_eq!(references, Table::Films);
            assert_eq!(id, 42);
        }
        other => panic!("expected referential integrity error, got {other:?}"),
    }
    assert_eq!(catalog.count(Table::FilmGenres).await.unwrap(), 0);
}

#[tokio::test]
async fn join_row_without_lookup_key_is_a_validation_error() {
    let catalog = open_catalog().await;
    let film = bare_film(&catalog).await;

    let err = catalog
        .create(film_genres::ActiveModel {
            film_id: Set(film.id),
            genre_id: NotSet,
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Validation {
            table: Table::FilmGenres,
            column: "genre_id"
        }
    ));
}

#[tokio::test]
async fn film_actor_is_checked_against_actors() {
    let catalog = open_catalog().await;
    let film = bare_film(&catalog).await;
    // A genre with id 1 exists, an actor with id 1 does not.
    let comedy = genre(&catalog, "comedy").await;

    let err = catalog
        .create(film_actors::ActiveModel {
            film_id: Set(film.id),
            actor_id: Set(comedy.id),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::ReferentialIntegrity {
            references: Table::Actors,
            ..
        }
    ));

    let actor = catalog
        .create(actors::ActiveModel {
            actor: Set(Some("Leonardo DiCaprio".to_string())),
            ..Default::default()
        })
        .await
        .unwrap();
    let credit = catalog
        .create(film_actors::ActiveModel {
            film_id: Set(film.id),
            actor_id: Set(actor.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(credit.actor_id, actor.id);
}

#[tokio::test]
async fn optional_foreign_keys_must_still_resolve() {
    let catalog = open_catalog().await;

    let err = catalog
        .create(users::ActiveModel {
            name: Set("Ann".to_string()),
            age: Set(30),
            sex: Set("F".to_string()),
            recommended_id: Set(Some(7)),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::ReferentialIntegrity {
            table: Table::Users,
            column: "recommended_id",
            references: Table::Films,
            id: 7
        }
    ));
    assert_eq!(catalog.count(Table::Users).await.unwrap(), 0);
}

#[tokio::test]
async fn caller_supplied_id_is_replaced() {
    let catalog = open_catalog().await;

    let first = catalog
        .create(keywords::ActiveModel {
            id: Set(99),
            keyword: Set(Some("dream".to_string())),
        })
        .await
        .unwrap();

    assert_eq!(first.id, 1);
    assert!(!catalog.exists(Table::Keywords, 99).await.unwrap());
}

#[tokio::test]
async fn duplicate_links_are_conflicts() {
    let catalog = open_catalog().await;
    let film = bare_film(&catalog).await;
    let drama = genre(&catalog, "drama").await;

    catalog
        .link(film.id, JoinTable::Genres, drama.id)
        .await
        .unwrap();
    let err = catalog
        .link(film.id, JoinTable::Genres, drama.id)
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Conflict(_)));
    assert_eq!(catalog.count(Table::FilmGenres).await.unwrap(), 1);
}

#[tokio::test]
async fn get_missing_row_is_not_found() {
    let catalog = open_catalog().await;

    let err = catalog.get::<films::Entity>(1).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            table: Table::Films,
            id: 1
        }
    ));
}

#[tokio::test]
async fn list_joined_follows_link_order() {
    let catalog = open_catalog().await;
    let film = bare_film(&catalog).await;

    let drama = genre(&catalog, "drama").await;
    let action = genre(&catalog, "action").await;
    let thriller = genre(&catalog, "thriller").await;

    for genre_id in [thriller.id, drama.id, action.id] {
        catalog
            .link(film.id, JoinTable::Genres, genre_id)
            .await
            .unwrap();
    }

    let linked = catalog.list_joined(film.id, JoinTable::Genres).await.unwrap();
    let labels: Vec<&str> = linked
        .iter()
        .map(|entry| entry.label.as_deref().unwrap())
        .collect();
    assert_eq!(labels, vec!["thriller", "drama", "action"]);
    assert_eq!(linked[0].id, thriller.id);

    let none = catalog
        .list_joined(film.id, JoinTable::Composers)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn list_joined_on_missing_film_is_not_found() {
    let catalog = open_catalog().await;

    let err = catalog
        .list_joined(5, JoinTable::Countries)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_merges_only_set_columns() {
    let catalog = open_catalog().await;
    let film = catalog
        .create(films::ActiveModel {
            time: Set(runtime(1, 30)),
            budget: Set(Some(Decimal::new(500_000_050, 2))),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = catalog
        .update(
            film.id,
            films::ActiveModel {
                fees_world: Set(Some(Decimal::new(1_200_000_075, 2))),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, film.id);
    assert_eq!(updated.time, runtime(1, 30));
    assert_eq!(updated.budget, Some(Decimal::new(500_000_050, 2)));
    assert_eq!(updated.fees_world, Some(Decimal::new(1_200_000_075, 2)));

    let fetched = catalog.get::<films::Entity>(film.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_can_clear_optional_reference() {
    let catalog = open_catalog().await;
    let film = bare_film(&catalog).await;
    let user = catalog
        .create(users::ActiveModel {
            name: Set("Ann".to_string()),
            age: Set(30),
            sex: Set("F".to_string()),
            watched_id: Set(Some(film.id)),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = catalog
        .update(
            user.id,
            users::ActiveModel {
                watched_id: Set(None),
                recommended_id: Set(Some(film.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.watched_id, None);
    assert_eq!(updated.recommended_id, Some(film.id));
    assert_eq!(updated.name, "Ann");
}

#[tokio::test]
async fn update_with_dangling_key_leaves_row_unchanged() {
    let catalog = open_catalog().await;
    let film = bare_film(&catalog).await;

    let err = catalog
        .update(
            film.id,
            films::ActiveModel {
                age_id: Set(Some(3)),
                budget: Set(Some(Decimal::new(1, 0))),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::ReferentialIntegrity {
            references: Table::Ages,
            ..
        }
    ));
    let fetched = catalog.get::<films::Entity>(film.id).await.unwrap();
    assert_eq!(fetched, film);
}

#[tokio::test]
async fn update_missing_row_is_not_found() {
    let catalog = open_catalog().await;

    let err = catalog
        .update(
            3,
            genres::ActiveModel {
                genre: Set(Some("noir".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            table: Table::Genres,
            id: 3
        }
    ));
}

#[tokio::test]
async fn update_cannot_duplicate_an_existing_link() {
    let catalog = open_catalog().await;
    let film = bare_film(&catalog).await;
    let drama = genre(&catalog, "drama").await;
    let action = genre(&catalog, "action").await;

    catalog
        .link(film.id, JoinTable::Genres, drama.id)
        .await
        .unwrap();
    let second = catalog
        .link(film.id, JoinTable::Genres, action.id)
        .await
        .unwrap();

    let err = catalog
        .update(
            second,
            film_genres::ActiveModel {
                genre_id: Set(drama.id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Conflict(_)));

    // Re-setting a row to its own pair is not a conflict.
    let same = catalog
        .update(
            second,
            film_genres::ActiveModel {
                genre_id: Set(action.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(same.genre_id, action.id);
}

#[tokio::test]
async fn film_details_collects_everything_attached() {
    let catalog = open_catalog().await;
    let age = catalog
        .create(ages::ActiveModel {
            age: Set(Some(12)),
            ..Default::default()
        })
        .await
        .unwrap();
    let film = catalog
        .create(films::ActiveModel {
            time: Set(runtime(2, 49)),
            age_id: Set(Some(age.id)),
            ..Default::default()
        })
        .await
        .unwrap();

    catalog
        .create(film_names::ActiveModel {
            film_id: Set(film.id),
            name_ru: Set(Some("Интерстеллар".to_string())),
            name_en: Set(Some("Interstellar".to_string())),
            ..Default::default()
        })
        .await
        .unwrap();
    catalog
        .create(films_with_index_sites::ActiveModel {
            film_id: Set(film.id),
            kinopoisk_id: Set(258_687),
            ..Default::default()
        })
        .await
        .unwrap();
    let rating = catalog
        .create(film_ratings::ActiveModel {
            film_id: Set(film.id),
            rating_kinopoisk: Set(Some(Decimal::new(86, 1))),
            ..Default::default()
        })
        .await
        .unwrap();
    for votes in [800_000, 812_345] {
        catalog
            .create(rating_counts::ActiveModel {
                film_rating_id: Set(rating.id),
                count_kinopoisk: Set(Some(Decimal::new(votes, 0))),
                ..Default::default()
            })
            .await
            .unwrap();
    }
    let scifi = genre(&catalog, "sci-fi").await;
    catalog
        .link(film.id, JoinTable::Genres, scifi.id)
        .await
        .unwrap();

    let details = FilmRepository::new(&catalog)
        .details(film.id)
        .await
        .unwrap();

    assert_eq!(details.film, film);
    assert_eq!(details.names.len(), 1);
    assert_eq!(details.names[0].name_en.as_deref(), Some("Interstellar"));
    assert_eq!(details.kinopoisk_ids(), vec![258_687]);
    assert_eq!(details.age.as_ref().and_then(|a| a.age), Some(12));
    assert!(details.rating_mpaa.is_none());
    assert_eq!(details.ratings.len(), 1);
    assert_eq!(details.ratings[0].counts.len(), 2);
    assert_eq!(details.linked(JoinTable::Genres).len(), 1);
    assert!(details.linked(JoinTable::Actors).is_empty());
}

#[tokio::test]
async fn viewers_and_recommendations_are_separate() {
    let catalog = open_catalog().await;
    let film = bare_film(&catalog).await;

    let watcher = catalog
        .create(users::ActiveModel {
            name: Set("Ann".to_string()),
            age: Set(30),
            sex: Set("F".to_string()),
            watched_id: Set(Some(film.id)),
            ..Default::default()
        })
        .await
        .unwrap();
    let recommended = catalog
        .create(users::ActiveModel {
            name: Set("Ivan".to_string()),
            age: Set(25),
            sex: Set("M".to_string()),
            recommended_id: Set(Some(film.id)),
            ..Default::default()
        })
        .await
        .unwrap();

    let films = FilmRepository::new(&catalog);
    assert_eq!(films.viewers(film.id).await.unwrap(), vec![watcher]);
    assert_eq!(films.recommended_to(film.id).await.unwrap(), vec![recommended]);
}
