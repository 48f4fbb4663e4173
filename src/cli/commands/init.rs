//! Init command handler

use std::path::Path;

use crate::config::Config;

pub fn cmd_init(path: Option<&Path>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| Path::new("config.toml"));
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }

    Config::default().save_to_path(path)?;
    println!("Created default config: {}", path.display());
    Ok(())
}
