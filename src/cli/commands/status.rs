//! Status command handler

use crate::config::Config;
use crate::db::Catalog;

pub async fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let catalog = Catalog::connect(config).await?;

    println!("Database: {}", config.general.database_url);
    println!(
        "Lookup delete policy: {:?}",
        catalog.registry().lookup_policy()
    );
    println!("{:-<40}", "");

    for def in catalog.registry().tables() {
        let rows = catalog.count(def.table).await?;
        println!("{:<28} {:>10}", def.table.name(), rows);
    }

    Ok(())
}
