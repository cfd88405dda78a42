//! Handler for `simdb build`

use anyhow::{Context, Result};
use serde::Serialize;
use simdb::Database;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::inputs;

pub const DB_FILE: &str = "db.json";
pub const LEFTOVER_DB_FILE: &str = "leftover_db.json";

/// Handle `simdb build`
pub fn handle(inputs_dir: &Path, output_dir: &Path, pretty: bool) -> Result<()> {
    let inputs = inputs::load(inputs_dir)?;
    let output = simdb::build(inputs).context("Database build failed")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
    write_database(&output_dir.join(DB_FILE), &output.full, pretty)?;
    write_database(&output_dir.join(LEFTOVER_DB_FILE), &output.leftover, pretty)?;

    println!("Database:          {}", output.full.counts());
    println!("Leftover database: {}", output.leftover.counts());
    println!("Icons:             {}", output.icons);
    Ok(())
}

fn write_database(path: &Path, db: &Database, pretty: bool) -> Result<()> {
    let json = to_json(db, pretty).context("Failed to serialize database")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
