//! Handler for `simdb talents`

use anyhow::{Context, Result};
use simdb::TalentTreeConfig;
use std::path::Path;

use crate::inputs::read_json;

/// Handle `simdb talents`
pub fn handle(path: &Path) -> Result<()> {
    let trees: Vec<TalentTreeConfig> = read_json(path)?;

    for tree in &trees {
        println!("{}", tree.name);
        for talent in &tree.talents {
            let ids = talent
                .rank_spell_ids(&tree.name)
                .with_context(|| format!("Invalid talent file {}", path.display()))?;
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            println!("  {:<32} {}", talent.field_name, ids.join(", "));
        }
    }

    Ok(())
}
