//! The entity store.
//!
//! One ordered collection per entity kind, keyed by ID. Reconciling kinds
//! (items, gems, enchants) go through [`Merge`]; pass-through kinds (zones,
//! NPCs, encounters, glyph IDs) are replaced wholesale.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::{DbError, Result};
use crate::merge::{Merge, Override};
use crate::overrides::{EnchantOverride, GemOverride, ItemOverride};
use crate::types::{
    Enchant, EnchantKey, EntityKind, Gem, GlyphId, IconData, Item, Npc, PresetEncounter, Record,
    Zone,
};

/// The aggregate database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    #[serde(with = "as_values")]
    pub items: BTreeMap<i32, Item>,
    #[serde(with = "as_values")]
    pub gems: BTreeMap<i32, Gem>,
    #[serde(with = "as_values")]
    pub enchants: BTreeMap<EnchantKey, Enchant>,
    #[serde(with = "as_values")]
    pub item_icons: BTreeMap<i32, IconData>,
    #[serde(with = "as_values")]
    pub spell_icons: BTreeMap<i32, IconData>,
    pub encounters: Vec<PresetEncounter>,
    #[serde(with = "as_values")]
    pub zones: BTreeMap<i32, Zone>,
    #[serde(with = "as_values")]
    pub npcs: BTreeMap<i32, Npc>,
    pub glyph_ids: Vec<GlyphId>,
}

/// Number of records per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbCounts {
    pub items: usize,
    pub gems: usize,
    pub enchants: usize,
    pub item_icons: usize,
    pub spell_icons: usize,
    pub encounters: usize,
    pub zones: usize,
    pub npcs: usize,
    pub glyph_ids: usize,
}

impl std::fmt::Display for DbCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} items, {} gems, {} enchants, {} item icons, {} spell icons, {} encounters, {} zones, {} npcs, {} glyph ids",
            self.items,
            self.gems,
            self.enchants,
            self.item_icons,
            self.spell_icons,
            self.encounters,
            self.zones,
            self.npcs,
            self.glyph_ids
        )
    }
}

fn merge_into<R: Merge>(map: &mut BTreeMap<R::Key, R>, record: R) -> Result<()> {
    if !record.has_valid_key() {
        return Err(DbError::InvalidKey { kind: R::KIND });
    }
    match map.entry(record.key()) {
        Entry::Occupied(mut existing) => existing.get_mut().merge_from(record),
        Entry::Vacant(slot) => {
            slot.insert(record);
        }
    }
    Ok(())
}

fn apply_override<O: Override>(
    map: &mut BTreeMap<<O::Target as Record>::Key, O::Target>,
    o: &O,
) -> Result<()> {
    if !o.has_valid_key() {
        return Err(DbError::InvalidKey {
            kind: <O::Target as Merge>::KIND,
        });
    }
    let target = map.entry(o.target_key()).or_insert_with(|| o.seed());
    o.apply_to(target);
    Ok(())
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep copy whose later mutation never affects `self`
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    pub fn counts(&self) -> DbCounts {
        DbCounts {
            items: self.items.len(),
            gems: self.gems.len(),
            enchants: self.enchants.len(),
            item_icons: self.item_icons.len(),
            spell_icons: self.spell_icons.len(),
            encounters: self.encounters.len(),
            zones: self.zones.len(),
            npcs: self.npcs.len(),
            glyph_ids: self.glyph_ids.len(),
        }
    }

    // === Reconciling collections ===

    pub fn merge_item(&mut self, item: Item) -> Result<()> {
        merge_into(&mut self.items, item)
    }

    /// Merge only when an item with the same ID is already present.
    ///
    /// Returns whether the item was merged.
    pub fn merge_existing_item(&mut self, item: Item) -> Result<bool> {
        if !item.has_valid_key() {
            return Err(DbError::InvalidKey {
                kind: <Item as Merge>::KIND,
            });
        }
        match self.items.get_mut(&item.id) {
            Some(existing) => {
                existing.merge_from(item);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn merge_items(&mut self, items: impl IntoIterator<Item = Item>) -> Result<()> {
        items.into_iter().try_for_each(|item| self.merge_item(item))
    }

    pub fn merge_gem(&mut self, gem: Gem) -> Result<()> {
        merge_into(&mut self.gems, gem)
    }

    pub fn merge_gems(&mut self, gems: impl IntoIterator<Item = Gem>) -> Result<()> {
        gems.into_iter().try_for_each(|gem| self.merge_gem(gem))
    }

    pub fn merge_enchant(&mut self, enchant: Enchant) -> Result<()> {
        merge_into(&mut self.enchants, enchant)
    }

    pub fn merge_enchants(&mut self, enchants: impl IntoIterator<Item = Enchant>) -> Result<()> {
        enchants
            .into_iter()
            .try_for_each(|enchant| self.merge_enchant(enchant))
    }

    // === Overrides ===

    pub fn apply_item_overrides<'a>(
        &mut self,
        overrides: impl IntoIterator<Item = &'a ItemOverride>,
    ) -> Result<()> {
        overrides
            .into_iter()
            .try_for_each(|o| apply_override(&mut self.items, o))
    }

    pub fn apply_gem_overrides<'a>(
        &mut self,
        overrides: impl IntoIterator<Item = &'a GemOverride>,
    ) -> Result<()> {
        overrides
            .into_iter()
            .try_for_each(|o| apply_override(&mut self.gems, o))
    }

    pub fn apply_enchant_overrides<'a>(
        &mut self,
        overrides: impl IntoIterator<Item = &'a EnchantOverride>,
    ) -> Result<()> {
        overrides
            .into_iter()
            .try_for_each(|o| apply_override(&mut self.enchants, o))
    }

    // === Pass-through collections ===

    /// Insert zones, replacing any with the same ID
    pub fn replace_zones(&mut self, zones: impl IntoIterator<Item = Zone>) -> Result<()> {
        for zone in zones {
            if !zone.has_valid_key() {
                return Err(DbError::InvalidKey {
                    kind: EntityKind::Zone,
                });
            }
            self.zones.insert(zone.id, zone);
        }
        Ok(())
    }

    /// Insert NPCs, replacing any with the same ID
    pub fn replace_npcs(&mut self, npcs: impl IntoIterator<Item = Npc>) -> Result<()> {
        for npc in npcs {
            if !npc.has_valid_key() {
                return Err(DbError::InvalidKey {
                    kind: EntityKind::Npc,
                });
            }
            self.npcs.insert(npc.id, npc);
        }
        Ok(())
    }

    pub fn set_encounters(&mut self, encounters: Vec<PresetEncounter>) {
        self.encounters = encounters;
    }

    pub fn set_glyph_ids(&mut self, glyph_ids: Vec<GlyphId>) {
        self.glyph_ids = glyph_ids;
    }

    // === Icons ===

    /// Store an item icon. Incomplete icons are ignored; returns whether stored.
    pub fn add_item_icon(&mut self, icon: IconData) -> bool {
        insert_icon(&mut self.item_icons, icon)
    }

    /// Store a spell icon. Incomplete icons are ignored; returns whether stored.
    pub fn add_spell_icon(&mut self, icon: IconData) -> bool {
        insert_icon(&mut self.spell_icons, icon)
    }
}

fn insert_icon(map: &mut BTreeMap<i32, IconData>, icon: IconData) -> bool {
    if !icon.has_valid_key() || !icon.is_complete() {
        return false;
    }
    map.insert(icon.id, icon);
    true
}

/// Serialize keyed collections as plain arrays in key order
mod as_values {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    use crate::types::Record;

    pub fn serialize<S, K, R>(map: &BTreeMap<K, R>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        R: Serialize,
    {
        serializer.collect_seq(map.values())
    }

    pub fn deserialize<'de, D, K, R>(deserializer: D) -> Result<BTreeMap<K, R>, D::Error>
    where
        D: Deserializer<'de>,
        K: Ord,
        R: Record<Key = K> + Deserialize<'de>,
    {
        let records = Vec::<R>::deserialize(deserializer)?;
        Ok(records.into_iter().map(|r| (r.key(), r)).collect())
    }
}
