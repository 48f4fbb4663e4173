pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod schema;

use anyhow::Context;
use clap::CommandFactory;
use cli::{Cli, Commands};
pub use config::Config;
pub use db::Catalog;
pub use error::CatalogError;
pub use schema::{JoinTable, LookupDeletePolicy, SchemaRegistry, Table};
use tracing_subscriber::EnvFilter;

/// Loads the config named on the command line, or searches the default locations.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        // `init` is what creates the file.
        Some(path) if !path.exists() && matches!(cli.command, Some(Commands::Init)) => {
            Config::default()
        }
        Some(path) => Config::load_from_path(path)?,
        None => return Config::load(),
    };
    dotenvy::dotenv().ok();
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to initialize tracing")?;

    Ok(())
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config)?;
    config.validate()?;

    match cli.command {
        Some(Commands::Migrate) => cli::cmd_migrate(&config).await,
        Some(Commands::Status) => cli::cmd_status(&config).await,
        Some(Commands::Show { film_id }) => cli::cmd_show_film(&config, film_id).await,
        Some(Commands::Delete { table, id }) => cli::cmd_delete(&config, &table, id).await,
        Some(Commands::Init) => cli::cmd_init(cli.config.as_deref()),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
