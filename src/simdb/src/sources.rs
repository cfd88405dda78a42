//! Normalized records handed over by the source adapters.
//!
//! Scraping and parsing the raw sources happens elsewhere; by the time data
//! reaches this crate it is one of the records below.

use serde::{Deserialize, Serialize};

use crate::types::{
    GemColor, Gem, IconData, Item, ItemQuality, ItemSource, ItemType, Npc, Zone,
};

/// What a tooltip describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipClass {
    #[default]
    Other,
    Equippable,
    Gem,
}

/// Item tooltip as scraped from the tooltip service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTooltip {
    pub id: i32,
    pub name: String,
    pub icon: String,
    pub class: TooltipClass,
    pub item_type: ItemType,
    pub ilvl: i32,
    pub quality: ItemQuality,
    pub set_name: String,
    pub phase: i32,
    pub unique: bool,
    pub heroic: bool,
    pub gem_color: GemColor,
    pub sources: Vec<ItemSource>,
}

impl ItemTooltip {
    pub fn is_equippable(&self) -> bool {
        self.class == TooltipClass::Equippable
    }

    pub fn is_gem(&self) -> bool {
        self.class == TooltipClass::Gem
    }

    pub fn to_item(&self) -> Item {
        Item {
            id: self.id,
            name: self.name.clone(),
            item_type: self.item_type,
            ilvl: self.ilvl,
            quality: self.quality,
            set_name: self.set_name.clone(),
            phase: self.phase,
            unique: self.unique,
            heroic: self.heroic,
            sources: self.sources.clone(),
            ..Default::default()
        }
    }

    pub fn to_gem(&self) -> Gem {
        Gem {
            id: self.id,
            name: self.name.clone(),
            color: self.gem_color,
            quality: self.quality,
            unique: self.unique,
            phase: self.phase,
        }
    }

    pub fn to_icon(&self) -> IconData {
        IconData {
            id: self.id,
            name: self.name.clone(),
            icon: self.icon.clone(),
        }
    }
}

/// Spell tooltip as scraped from the tooltip service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellTooltip {
    pub id: i32,
    pub name: String,
    pub icon: String,
}

impl SpellTooltip {
    pub fn to_icon(&self) -> IconData {
        IconData {
            id: self.id,
            name: self.name.clone(),
            icon: self.icon.clone(),
        }
    }
}

/// Loot-table export: item sources plus the zones and NPCs they reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootDatabase {
    pub items: Vec<Item>,
    pub zones: Vec<Zone>,
    pub npcs: Vec<Npc>,
}
