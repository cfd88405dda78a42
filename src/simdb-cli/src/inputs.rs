//! Loading the inputs directory into a [`BuildInputs`]

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use simdb::{
    tree_spell_ids, BuildInputs, FactionMap, GlyphId, IconRequests, Item, ItemTooltip,
    LootDatabase, Overrides, PresetEncounter, SpellTooltip, TalentTreeConfig,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::FiltersFile;

pub const ITEM_TOOLTIPS_FILE: &str = "item_tooltips.json";
pub const SPELL_TOOLTIPS_FILE: &str = "spell_tooltips.json";
pub const GEAR_PLANNER_FILE: &str = "gearplanner_items.json";
pub const LOOT_FILE: &str = "lootdb.json";
pub const FACTIONS_FILE: &str = "faction_restrictions.json";
pub const GLYPHS_FILE: &str = "glyph_id_map.json";
pub const ENCOUNTERS_FILE: &str = "encounters.json";
pub const OVERRIDES_FILE: &str = "overrides.json";
pub const TALENTS_DIR: &str = "talents";
pub const ROTATIONS_FILE: &str = "rotations.json";

/// Read and parse a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load every input collection from `dir`
pub fn load(dir: &Path) -> Result<BuildInputs> {
    let filters = FiltersFile::load(dir)?;

    let item_tooltips: Vec<ItemTooltip> = read_json(&dir.join(ITEM_TOOLTIPS_FILE))?;
    let spell_tooltips: Vec<SpellTooltip> = read_json(&dir.join(SPELL_TOOLTIPS_FILE))?;
    let gear_planner_items: Vec<Item> = read_json(&dir.join(GEAR_PLANNER_FILE))?;
    let loot: LootDatabase = read_json(&dir.join(LOOT_FILE))?;
    let factions: FactionMap = read_json(&dir.join(FACTIONS_FILE))?;
    let glyph_ids: Vec<GlyphId> = read_json(&dir.join(GLYPHS_FILE))?;
    let encounters: Vec<PresetEncounter> = read_json(&dir.join(ENCOUNTERS_FILE))?;
    let overrides: Overrides = read_json(&dir.join(OVERRIDES_FILE))?;

    info!(
        item_tooltips = item_tooltips.len(),
        spell_tooltips = spell_tooltips.len(),
        gear_planner = gear_planner_items.len(),
        loot = loot.items.len(),
        "Loaded inputs from {}",
        dir.display()
    );

    let icon_requests = IconRequests {
        extra_item_icons: filters.icons.extra_item_icons.clone(),
        shared_spell_icons: filters.icons.shared_spell_icons.clone(),
        talent_spell_ids: load_talents(&dir.join(TALENTS_DIR))?,
        rotation_spell_ids: read_json(&dir.join(ROTATIONS_FILE))?,
    };

    Ok(BuildInputs {
        item_tooltips,
        spell_tooltips,
        gear_planner_items,
        loot,
        overrides,
        filters: filters.compile()?,
        factions,
        encounters,
        glyph_ids,
        icon_requests,
    })
}

/// Spell IDs per talent file, keyed by file stem
fn load_talents(dir: &Path) -> Result<BTreeMap<String, Vec<i32>>> {
    let mut talents = BTreeMap::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list talents directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let trees: Vec<TalentTreeConfig> = read_json(&path)?;
        let ids = tree_spell_ids(&trees)
            .with_context(|| format!("Invalid talent file {}", path.display()))?;
        talents.insert(stem.to_string(), ids);
    }
    info!(trees = talents.len(), "Loaded talents from {}", dir.display());
    Ok(talents)
}
