//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simdb")]
#[command(about = "Simulator item database generator", long_about = None)]
pub struct Cli {
    /// Log each filter stage (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate db.json and leftover_db.json from the input directory
    #[command(visible_alias = "b")]
    Build {
        /// Directory holding the source collections and filters.toml
        #[arg(short, long, default_value = "assets/db_inputs")]
        inputs: PathBuf,

        /// Directory the databases are written to
        #[arg(short, long, default_value = "assets/database")]
        output: PathBuf,

        /// Pretty-print the written JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Show per-kind counts of a generated database
    Stats {
        /// Path to db.json or leftover_db.json
        database: PathBuf,
    },

    /// Show the spell IDs of every rank in a talent tree file
    Talents {
        /// Path to a talent tree JSON file
        input: PathBuf,
    },
}
