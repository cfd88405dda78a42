//! Handler for `simdb stats`

use anyhow::Result;
use simdb::Database;
use std::path::Path;

use crate::inputs::read_json;

/// Handle `simdb stats`
pub fn handle(path: &Path) -> Result<()> {
    let db: Database = read_json(path)?;
    let counts = db.counts();

    println!("Database Statistics ({})", path.display());
    println!("  Items:       {}", counts.items);
    println!("  Gems:        {}", counts.gems);
    println!("  Enchants:    {}", counts.enchants);
    println!("  Item icons:  {}", counts.item_icons);
    println!("  Spell icons: {}", counts.spell_icons);
    println!("  Encounters:  {}", counts.encounters);
    println!("  Zones:       {}", counts.zones);
    println!("  NPCs:        {}", counts.npcs);
    println!("  Glyph IDs:   {}", counts.glyph_ids);
    Ok(())
}
