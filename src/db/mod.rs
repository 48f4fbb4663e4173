use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

mod catalog;
mod films;
pub mod migrator;

pub use catalog::{CascadeReport, Catalog, LookupEntry};
pub use films::{FilmDetails, FilmRepository, RatingWithCounts};

/// Opens the database behind `db_url` and brings its schema up to date.
///
/// In-memory SQLite databases are private to a single connection, so the pool is
/// pinned to exactly one connection for them.
pub async fn connect(
    db_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<DatabaseConnection> {
    use sea_orm_migration::MigratorTrait;

    let in_memory = is_in_memory(db_url);

    if !in_memory && let Some(path_str) = sqlite_path(db_url) {
        if let Some(parent) = Path::new(path_str).parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
        if !Path::new(path_str).exists() {
            std::fs::File::create(path_str)
                .with_context(|| format!("Failed to create database file: {path_str}"))?;
        }
    }

    let mut opt = ConnectOptions::new(db_url.to_string());
    if in_memory {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600));
    }
    opt.connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .with_context(|| format!("Failed to connect to {db_url}"))?;

    migrator::Migrator::up(&conn, None)
        .await
        .context("Failed to apply migrations")?;

    if in_memory {
        info!("In-memory database ready & migrations applied");
    } else {
        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );
    }

    Ok(conn)
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

/// File path of a `sqlite:` URL, without any query parameters.
fn sqlite_path(db_url: &str) -> Option<&str> {
    let rest = db_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);
    (!path.is_empty()).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_path() {
        assert_eq!(sqlite_path("sqlite:data/filmnet.db"), Some("data/filmnet.db"));
        assert_eq!(
            sqlite_path("sqlite://data/filmnet.db?mode=rwc"),
            Some("data/filmnet.db")
        );
        assert_eq!(sqlite_path("postgres://localhost/filmnet"), None);
        assert_eq!(sqlite_path("sqlite:"), None);
    }

    #[test]
    fn test_is_in_memory() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:catalog?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite:data/filmnet.db"));
    }
}
