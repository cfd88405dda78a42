//! Entity types for the item database.
//!
//! Every entity is identified by a stable integer key that is unique within
//! its kind. A key of zero means "unset" and is never stored.

use serde::{Deserialize, Serialize};

/// Kinds of records held by the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Item,
    Gem,
    Enchant,
    ItemIcon,
    SpellIcon,
    Zone,
    Npc,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Gem => write!(f, "gem"),
            Self::Enchant => write!(f, "enchant"),
            Self::ItemIcon => write!(f, "item icon"),
            Self::SpellIcon => write!(f, "spell icon"),
            Self::Zone => write!(f, "zone"),
            Self::Npc => write!(f, "npc"),
        }
    }
}

/// A record that can live in a keyed collection of the database
pub trait Record {
    type Key: Ord + Copy + std::fmt::Debug;

    fn key(&self) -> Self::Key;

    /// Whether the key identifies anything (zero keys are rejected)
    fn has_valid_key(&self) -> bool;
}

// ============================================================================
// Enumerations
// ============================================================================

/// Item quality, ordered from worst to best.
///
/// Source data carries quality as a raw integer, so values outside the known
/// tiers are kept as `Unrecognized` instead of failing the whole import.
/// Equality, hashing and ordering all go through the raw value, so a
/// negative quality sorts below `Poor` and anything past 7 above `Heirloom`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ItemQuality {
    #[default]
    Poor,
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Artifact,
    Heirloom,
    Unrecognized(i32),
}

impl From<i32> for ItemQuality {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::Poor,
            1 => Self::Common,
            2 => Self::Uncommon,
            3 => Self::Rare,
            4 => Self::Epic,
            5 => Self::Legendary,
            6 => Self::Artifact,
            7 => Self::Heirloom,
            other => Self::Unrecognized(other),
        }
    }
}

impl From<ItemQuality> for i32 {
    fn from(quality: ItemQuality) -> Self {
        match quality {
            ItemQuality::Poor => 0,
            ItemQuality::Common => 1,
            ItemQuality::Uncommon => 2,
            ItemQuality::Rare => 3,
            ItemQuality::Epic => 4,
            ItemQuality::Legendary => 5,
            ItemQuality::Artifact => 6,
            ItemQuality::Heirloom => 7,
            ItemQuality::Unrecognized(other) => other,
        }
    }
}

impl PartialEq for ItemQuality {
    fn eq(&self, other: &Self) -> bool {
        i32::from(*self) == i32::from(*other)
    }
}

impl Eq for ItemQuality {}

impl std::hash::Hash for ItemQuality {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        i32::from(*self).hash(state);
    }
}

impl PartialOrd for ItemQuality {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ItemQuality {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        i32::from(*self).cmp(&i32::from(*other))
    }
}

impl std::fmt::Display for ItemQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poor => write!(f, "poor"),
            Self::Common => write!(f, "common"),
            Self::Uncommon => write!(f, "uncommon"),
            Self::Rare => write!(f, "rare"),
            Self::Epic => write!(f, "epic"),
            Self::Legendary => write!(f, "legendary"),
            Self::Artifact => write!(f, "artifact"),
            Self::Heirloom => write!(f, "heirloom"),
            Self::Unrecognized(value) => write!(f, "unrecognized({})", value),
        }
    }
}

impl std::str::FromStr for ItemQuality {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "poor" | "junk" => Ok(Self::Poor),
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "epic" => Ok(Self::Epic),
            "legendary" => Ok(Self::Legendary),
            "artifact" => Ok(Self::Artifact),
            "heirloom" => Ok(Self::Heirloom),
            _ => Err(ParseError::InvalidQuality(s.to_string())),
        }
    }
}

/// Gem socket color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GemColor {
    #[default]
    Unknown,
    Meta,
    Red,
    Blue,
    Yellow,
    Green,
    Orange,
    Purple,
    Prismatic,
}

impl std::fmt::Display for GemColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Meta => write!(f, "meta"),
            Self::Red => write!(f, "red"),
            Self::Blue => write!(f, "blue"),
            Self::Yellow => write!(f, "yellow"),
            Self::Green => write!(f, "green"),
            Self::Orange => write!(f, "orange"),
            Self::Purple => write!(f, "purple"),
            Self::Prismatic => write!(f, "prismatic"),
        }
    }
}

impl std::str::FromStr for GemColor {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "meta" => Ok(Self::Meta),
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            "yellow" => Ok(Self::Yellow),
            "green" => Ok(Self::Green),
            "orange" => Ok(Self::Orange),
            "purple" => Ok(Self::Purple),
            "prismatic" => Ok(Self::Prismatic),
            _ => Err(ParseError::InvalidGemColor(s.to_string())),
        }
    }
}

/// Faction an item is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactionRestriction {
    #[default]
    Unrestricted,
    AllianceOnly,
    HordeOnly,
}

impl std::fmt::Display for FactionRestriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrestricted => write!(f, "unrestricted"),
            Self::AllianceOnly => write!(f, "alliance_only"),
            Self::HordeOnly => write!(f, "horde_only"),
        }
    }
}

/// Equipment slot category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    #[default]
    Unknown,
    Head,
    Neck,
    Shoulder,
    Back,
    Chest,
    Wrist,
    Hands,
    Waist,
    Legs,
    Feet,
    Finger,
    Trinket,
    Weapon,
    Ranged,
}

/// Crafting profession
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    #[default]
    Unknown,
    Alchemy,
    Blacksmithing,
    Enchanting,
    Engineering,
    Inscription,
    Jewelcrafting,
    Leatherworking,
    Tailoring,
}

/// Instance difficulty for drops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Unknown,
    Normal,
    Heroic,
    Raid10,
    Raid10Heroic,
    Raid25,
    Raid25Heroic,
}

// ============================================================================
// Entities
// ============================================================================

/// Where an item can be obtained
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSource {
    Crafted {
        #[serde(default)]
        profession: Profession,
        spell_id: i32,
    },
    Drop {
        #[serde(default)]
        zone_id: i32,
        #[serde(default)]
        npc_id: i32,
        #[serde(default)]
        difficulty: Difficulty,
        #[serde(default)]
        category: String,
    },
    Quest {
        id: i32,
        #[serde(default)]
        name: String,
    },
    SoldBy {
        #[serde(default)]
        npc_id: i32,
        #[serde(default)]
        npc_name: String,
        #[serde(default)]
        zone_name: String,
    },
}

impl ItemSource {
    /// Spell that crafts the item, for crafted sources
    pub fn crafted_spell_id(&self) -> Option<i32> {
        match self {
            Self::Crafted { spell_id, .. } if *spell_id != 0 => Some(*spell_id),
            _ => None,
        }
    }
}

/// Equippable item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub item_type: ItemType,
    pub ilvl: i32,
    pub quality: ItemQuality,
    /// Name of the item set this piece belongs to, empty if none
    pub set_name: String,
    pub phase: i32,
    pub unique: bool,
    pub heroic: bool,
    pub faction_restriction: FactionRestriction,
    pub sources: Vec<ItemSource>,
}

impl Item {
    /// Spell IDs of every crafted source
    pub fn crafted_spell_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.sources.iter().filter_map(ItemSource::crafted_spell_id)
    }
}

impl Record for Item {
    type Key = i32;

    fn key(&self) -> i32 {
        self.id
    }

    fn has_valid_key(&self) -> bool {
        self.id != 0
    }
}

/// Socketable gem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gem {
    pub id: i32,
    pub name: String,
    pub color: GemColor,
    pub quality: ItemQuality,
    pub unique: bool,
    pub phase: i32,
}

impl Record for Gem {
    type Key = i32;

    fn key(&self) -> i32 {
        self.id
    }

    fn has_valid_key(&self) -> bool {
        self.id != 0
    }
}

/// Key of an enchant.
///
/// Enchants are applied either by using an item or by casting a spell, and
/// several enchants share an effect, so all three IDs form the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct EnchantKey {
    pub effect_id: i32,
    pub item_id: i32,
    pub spell_id: i32,
}

/// Enchant applied to an item slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enchant {
    pub effect_id: i32,
    /// Item that applies the enchant, 0 if not item-based
    pub item_id: i32,
    /// Spell that applies the enchant, 0 if not spell-based
    pub spell_id: i32,
    pub name: String,
    pub quality: ItemQuality,
    pub phase: i32,
}

impl Record for Enchant {
    type Key = EnchantKey;

    fn key(&self) -> EnchantKey {
        EnchantKey {
            effect_id: self.effect_id,
            item_id: self.item_id,
            spell_id: self.spell_id,
        }
    }

    fn has_valid_key(&self) -> bool {
        self.effect_id != 0 || self.item_id != 0 || self.spell_id != 0
    }
}

/// Display name and icon asset for an item or spell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconData {
    pub id: i32,
    pub name: String,
    pub icon: String,
}

impl IconData {
    /// Icons without a name or asset key carry no information
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.icon.is_empty()
    }
}

impl Record for IconData {
    type Key = i32;

    fn key(&self) -> i32 {
        self.id
    }

    fn has_valid_key(&self) -> bool {
        self.id != 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    pub id: i32,
    pub name: String,
}

impl Record for Zone {
    type Key = i32;

    fn key(&self) -> i32 {
        self.id
    }

    fn has_valid_key(&self) -> bool {
        self.id != 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Npc {
    pub id: i32,
    pub name: String,
    pub zone_id: i32,
}

impl Record for Npc {
    type Key = i32;

    fn key(&self) -> i32 {
        self.id
    }

    fn has_valid_key(&self) -> bool {
        self.id != 0
    }
}

/// Preset encounter exposed to the simulator UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetEncounter {
    pub path: String,
    pub targets: Vec<String>,
}

/// Glyph item to glyph spell mapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphId {
    #[serde(alias = "itemId")]
    pub item_id: i32,
    #[serde(alias = "spellId")]
    pub spell_id: i32,
}

/// Parse errors for string conversions
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid item quality: {0}")]
    InvalidQuality(String),
    #[error("Invalid gem color: {0}")]
    InvalidGemColor(String),
}
