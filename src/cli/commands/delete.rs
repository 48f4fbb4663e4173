//! Delete command handler

use anyhow::Context;

use crate::config::Config;
use crate::db::Catalog;
use crate::schema::Table;

pub async fn cmd_delete(config: &Config, table: &str, id: i32) -> anyhow::Result<()> {
    let table: Table = table
        .parse()
        .with_context(|| format!("Cannot delete from '{table}'"))?;

    let catalog = Catalog::connect(config).await?;
    let report = catalog.delete_in(table, id).await?;

    println!("Deleted {table} row {id} ({} rows total)", report.total());
    for (table, rows) in &report.removed {
        println!("  {:<28} {:>6}", table.name(), rows);
    }

    Ok(())
}
