//! Manual override records.
//!
//! Overrides are partial records: every field left as `None` is untouched,
//! every `Some` field replaces whatever earlier sources produced. Faction
//! restrictions come only from the faction map.

use serde::{Deserialize, Serialize};

use crate::types::{GemColor, ItemQuality, ItemSource, ItemType};

/// Hand-maintained corrections for items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ItemOverride {
    pub id: i32,
    pub name: Option<String>,
    pub item_type: Option<ItemType>,
    pub ilvl: Option<i32>,
    pub quality: Option<ItemQuality>,
    pub set_name: Option<String>,
    pub phase: Option<i32>,
    pub unique: Option<bool>,
    pub heroic: Option<bool>,
    /// Replaces the accumulated sources when present
    pub sources: Option<Vec<ItemSource>>,
}

/// Hand-maintained corrections for gems
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GemOverride {
    pub id: i32,
    pub name: Option<String>,
    pub color: Option<GemColor>,
    pub quality: Option<ItemQuality>,
    pub unique: Option<bool>,
    pub phase: Option<i32>,
}

/// Hand-maintained corrections for enchants, keyed like [`crate::Enchant`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnchantOverride {
    pub effect_id: i32,
    pub item_id: i32,
    pub spell_id: i32,
    pub name: Option<String>,
    pub quality: Option<ItemQuality>,
    pub phase: Option<i32>,
}

/// All override tables, as loaded from `overrides.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    pub items: Vec<ItemOverride>,
    pub gems: Vec<GemOverride>,
    pub enchants: Vec<EnchantOverride>,
}
