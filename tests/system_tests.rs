//! End-to-end checks against a file-backed database.

use chrono::NaiveTime;
use filmnet::entities::{country, films};
use filmnet::{Catalog, Config, JoinTable, LookupDeletePolicy, Table};
use sea_orm::Set;
use std::path::PathBuf;

fn temp_db(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "filmnet-{name}-{}-{}.db",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ))
}

fn config_for(path: &PathBuf, policy: LookupDeletePolicy) -> Config {
    let mut config = Config::default();
    config.general.database_url = format!("sqlite:{}", path.display());
    config.catalog.lookup_delete_policy = policy;
    config
}

#[tokio::test]
async fn catalog_survives_reconnect() {
    let path = temp_db("reconnect");
    let config = config_for(&path, LookupDeletePolicy::Restrict);

    let (film_id, usa_id) = {
        let catalog = Catalog::connect(&config).await.expect("failed to connect");
        catalog.ping().await.unwrap();

        let film = catalog
            .create(films::ActiveModel {
                time: Set(NaiveTime::from_hms_opt(1, 50, 0).unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();
        let usa = catalog
            .create(country::ActiveModel {
                name: Set(Some("USA".to_string())),
                ..Default::default()
            })
            .await
            .unwrap();
        catalog
            .link(film.id, JoinTable::Countries, usa.id)
            .await
            .unwrap();
        catalog.conn().clone().close().await.unwrap();
        (film.id, usa.id)
    };

    // Migrations are idempotent on an existing file.
    let catalog = Catalog::connect(&config).await.expect("failed to reconnect");
    let linked = catalog
        .list_joined(film_id, JoinTable::Countries)
        .await
        .unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, usa_id);
    assert_eq!(linked[0].label.as_deref(), Some("USA"));

    catalog.delete_in(Table::Films, film_id).await.unwrap();
    assert_eq!(catalog.count(Table::FilmCountries).await.unwrap(), 0);
    assert_eq!(catalog.count(Table::Countries).await.unwrap(), 1);

    catalog.conn().clone().close().await.ok();
    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn configured_policy_reaches_the_registry() {
    let path = temp_db("policy");
    let config = config_for(&path, LookupDeletePolicy::Cascade);

    let catalog = Catalog::connect(&config).await.expect("failed to connect");
    assert_eq!(
        catalog.registry().lookup_policy(),
        LookupDeletePolicy::Cascade
    );
    assert!(!catalog.registry().restricts_delete(Table::Genres));

    catalog.conn().clone().close().await.ok();
    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn unique_pair_index_backs_up_duplicate_check() {
    use sea_orm::{ConnectionTrait, Statement};

    let catalog = Catalog::in_memory(LookupDeletePolicy::Restrict)
        .await
        .unwrap();
    let film = catalog
        .create(films::ActiveModel {
            time: Set(NaiveTime::from_hms_opt(1, 40, 0).unwrap()),
            ..Default::default()
        })
        .await
        .unwrap();
    let usa = catalog
        .create(country::ActiveModel {
            name: Set(Some("USA".to_string())),
            ..Default::default()
        })
        .await
        .unwrap();
    catalog
        .link(film.id, JoinTable::Countries, usa.id)
        .await
        .unwrap();

    let conn = catalog.conn();
    let raw = conn
        .execute(Statement::from_sql_and_values(
            conn.get_database_backend(),
            "INSERT INTO film_country (film_id, country_id) VALUES (?, ?)",
            [film.id.into(), usa.id.into()],
        ))
        .await;
    assert!(raw.is_err());
}
