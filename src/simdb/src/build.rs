//! End-to-end database generation.
//!
//! Merges every source in a fixed order, runs the global filters, then splits
//! the result into the simmable database and the leftover database.

use std::collections::HashSet;

use tracing::info;

use crate::database::Database;
use crate::error::Result;
use crate::filters::{FactionMap, FilterConfig, Pipeline};
use crate::icons::{attach_icons, IconReport, IconRequests, IconSources};
use crate::overrides::Overrides;
use crate::simmable::{partition, SimmablePredicate};
use crate::sources::{ItemTooltip, LootDatabase, SpellTooltip};
use crate::types::{GlyphId, Item, PresetEncounter};

/// Everything a build consumes, fully loaded
#[derive(Debug, Clone, Default)]
pub struct BuildInputs {
    pub item_tooltips: Vec<ItemTooltip>,
    pub spell_tooltips: Vec<SpellTooltip>,
    pub gear_planner_items: Vec<Item>,
    pub loot: LootDatabase,
    pub overrides: Overrides,
    pub filters: FilterConfig,
    pub factions: FactionMap,
    pub encounters: Vec<PresetEncounter>,
    pub glyph_ids: Vec<GlyphId>,
    pub icon_requests: IconRequests,
}

/// Result of a build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Simmable database, with icons, zones and NPCs
    pub full: Database,
    /// Everything the simulator does not use
    pub leftover: Database,
    pub icons: IconReport,
}

/// Run a full generation
pub fn build(inputs: BuildInputs) -> Result<BuildOutput> {
    let BuildInputs {
        item_tooltips,
        spell_tooltips,
        gear_planner_items,
        loot,
        overrides,
        filters,
        factions,
        encounters,
        glyph_ids,
        icon_requests,
    } = inputs;

    let mut db = Database::new();

    // Tooltips only contribute equippables the gear planner also knows about
    let planned: HashSet<i32> = gear_planner_items.iter().map(|item| item.id).collect();
    for tooltip in &item_tooltips {
        if tooltip.is_equippable() && planned.contains(&tooltip.id) {
            db.merge_item(tooltip.to_item())?;
        } else if tooltip.is_gem() {
            db.merge_gem(tooltip.to_gem())?;
        }
    }
    info!(counts = %db.counts(), "Merged tooltips");

    let mut matched = 0usize;
    for item in gear_planner_items {
        matched += usize::from(db.merge_existing_item(item)?);
    }
    info!(matched, "Merged gear planner items");

    let mut matched = 0usize;
    for item in loot.items {
        matched += usize::from(db.merge_existing_item(item)?);
    }
    info!(matched, "Merged loot table items");

    db.apply_item_overrides(&overrides.items)?;
    db.apply_gem_overrides(&overrides.gems)?;
    db.apply_enchant_overrides(&overrides.enchants)?;
    info!(
        items = overrides.items.len(),
        gems = overrides.gems.len(),
        enchants = overrides.enchants.len(),
        "Applied overrides"
    );

    db.set_encounters(encounters);
    db.set_glyph_ids(glyph_ids);

    Pipeline::new(&filters, &factions).run(&mut db);
    info!(counts = %db.counts(), "Applied global filters");

    let predicate = SimmablePredicate::new(&filters);
    let split = partition(db, &predicate);
    let mut full = split.simmable;
    let leftover = split.leftover;

    let icon_sources = IconSources::new(&item_tooltips, &spell_tooltips);
    let icons = attach_icons(&mut full, &icon_sources, &icon_requests);
    info!(report = %icons, "Attached icons");

    full.replace_zones(loot.zones)?;
    full.replace_npcs(loot.npcs)?;

    info!(full = %full.counts(), leftover = %leftover.counts(), "Build complete");
    Ok(BuildOutput {
        full,
        leftover,
        icons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterSettings;
    use crate::overrides::{GemOverride, ItemOverride};
    use crate::sources::TooltipClass;
    use crate::types::{FactionRestriction, GemColor, ItemQuality, Npc, Zone};

    fn equippable(id: i32, name: &str, icon: &str) -> ItemTooltip {
        ItemTooltip {
            id,
            name: name.to_string(),
            icon: icon.to_string(),
            class: TooltipClass::Equippable,
            ..Default::default()
        }
    }

    fn planned(id: i32, ilvl: i32, quality: ItemQuality) -> Item {
        Item {
            id,
            ilvl,
            quality,
            ..Default::default()
        }
    }

    #[test]
    fn test_tooltip_and_planner_combine() {
        let inputs = BuildInputs {
            item_tooltips: vec![equippable(1, "Sword", "inv_sword")],
            gear_planner_items: vec![planned(1, 200, ItemQuality::Epic)],
            ..Default::default()
        };
        let out = build(inputs).unwrap();

        let sword = &out.full.items[&1];
        assert_eq!(sword.name, "Sword");
        assert_eq!(sword.ilvl, 200);
        assert_eq!(out.full.item_icons[&1].icon, "inv_sword");
        assert!(out.leftover.items.is_empty());
    }

    #[test]
    fn test_unplanned_equippables_are_ignored() {
        let inputs = BuildInputs {
            item_tooltips: vec![equippable(2, "Orphan", "inv_orphan")],
            loot: LootDatabase {
                items: vec![planned(2, 200, ItemQuality::Epic)],
                ..Default::default()
            },
            ..Default::default()
        };
        let out = build(inputs).unwrap();
        assert!(out.full.items.is_empty());
        assert!(out.leftover.items.is_empty());
    }

    #[test]
    fn test_variant_duplicate_removed() {
        let inputs = BuildInputs {
            item_tooltips: vec![
                equippable(100, "Heroes' Plate Helm", "a"),
                equippable(101, "Plate Helm", "b"),
            ],
            gear_planner_items: vec![
                planned(100, 200, ItemQuality::Epic),
                planned(101, 200, ItemQuality::Epic),
            ],
            ..Default::default()
        };
        let out = build(inputs).unwrap();
        assert!(out.full.items.contains_key(&100));
        assert!(!out.full.items.contains_key(&101));
        assert!(!out.leftover.items.contains_key(&101));
    }

    #[test]
    fn test_overrides_apply_after_sources() {
        let inputs = BuildInputs {
            item_tooltips: vec![
                equippable(5, "Trinket", "inv_trinket"),
                ItemTooltip {
                    id: 41285,
                    name: "Chaotic Skyflare Diamond".to_string(),
                    icon: "inv_diamond".to_string(),
                    class: TooltipClass::Gem,
                    gem_color: GemColor::Meta,
                    quality: ItemQuality::Rare,
                    ..Default::default()
                },
            ],
            gear_planner_items: vec![planned(5, 200, ItemQuality::Epic)],
            overrides: Overrides {
                items: vec![ItemOverride {
                    id: 5,
                    ilvl: Some(226),
                    ..Default::default()
                }],
                gems: vec![GemOverride {
                    id: 41285,
                    unique: Some(true),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        let out = build(inputs).unwrap();
        assert_eq!(out.full.items[&5].ilvl, 226);
        assert!(out.full.gems[&41285].unique);
    }

    #[test]
    fn test_deny_list_beats_allow_list() {
        let filters = FilterConfig::try_from(FilterSettings {
            item_deny_list: vec![9],
            item_allow_list: vec![9],
            ..Default::default()
        })
        .unwrap();
        let inputs = BuildInputs {
            item_tooltips: vec![equippable(9, "Banned", "inv_banned")],
            gear_planner_items: vec![planned(9, 200, ItemQuality::Epic)],
            filters,
            ..Default::default()
        };
        let out = build(inputs).unwrap();
        assert!(!out.full.items.contains_key(&9));
        assert!(!out.leftover.items.contains_key(&9));
        assert!(!out.full.item_icons.contains_key(&9));
    }

    #[test]
    fn test_factions_zones_and_npcs() {
        let inputs = BuildInputs {
            item_tooltips: vec![equippable(3, "Tabard", "inv_tabard")],
            gear_planner_items: vec![planned(3, 200, ItemQuality::Epic)],
            factions: FactionMap::from([(3, FactionRestriction::HordeOnly)]),
            loot: LootDatabase {
                zones: vec![Zone {
                    id: 4812,
                    name: "Icecrown Citadel".to_string(),
                }],
                npcs: vec![Npc {
                    id: 36597,
                    name: "The Lich King".to_string(),
                    zone_id: 4812,
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        let out = build(inputs).unwrap();
        assert_eq!(
            out.full.items[&3].faction_restriction,
            FactionRestriction::HordeOnly
        );
        assert!(out.full.zones.contains_key(&4812));
        assert!(out.full.npcs.contains_key(&36597));
        assert!(out.leftover.zones.is_empty());
    }
}
