//! Migrate command handler

use crate::config::Config;
use crate::db::Catalog;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    // Connecting applies any pending migrations.
    let catalog = Catalog::connect(config).await?;
    catalog.ping().await?;

    println!("Schema is up to date: {}", config.general.database_url);
    Ok(())
}
