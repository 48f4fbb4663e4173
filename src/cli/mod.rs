//! CLI module - Command-line interface for FilmNet
//!
//! Maintenance commands for the catalog database, parsed with clap.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FilmNet - film catalog store
#[derive(Parser)]
#[command(name = "filmnet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (default: search the usual locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or upgrade the database schema
    Migrate,

    /// Show row counts for every table
    #[command(alias = "st")]
    Status,

    /// Show a film with its names, ratings and credits
    #[command(alias = "i")]
    Show {
        /// Film ID
        film_id: i32,
    },

    /// Delete a row and everything that depends on it
    #[command(alias = "rm")]
    Delete {
        /// Table name, e.g. films or genres
        table: String,
        /// Row ID
        id: i32,
    },

    /// Create default config file
    Init,
}

pub use commands::*;
