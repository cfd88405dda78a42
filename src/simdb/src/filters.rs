//! Global filter pipeline.
//!
//! Stages run in the order of [`GLOBAL_STAGES`]. Several stages compare the
//! item set against itself; those always scan the current set first to build
//! a lookup, then filter against that lookup, so the result never depends on
//! iteration order.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::types::FactionRestriction;

/// Items above this level are never included
pub const DEFAULT_MAX_ITEM_LEVEL: i32 = 416;

/// Item level of the duplicated tier set pieces
pub const DUPLICATE_SET_ILVL: i32 = 251;

/// Gems with this name suffix are flagged unique in source data but are not
pub const NON_UNIQUE_GEM_SUFFIX: &str = "Stormjewel";

/// Faction restriction per item ID
pub type FactionMap = HashMap<i32, FactionRestriction>;

/// Deny/allow configuration as written in `filters.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub max_item_level: i32,
    pub item_deny_list: Vec<i32>,
    pub item_allow_list: Vec<i32>,
    pub gem_deny_list: Vec<i32>,
    pub gem_allow_list: Vec<i32>,
    /// Regular expressions matched against item and gem names
    pub deny_name_patterns: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            max_item_level: DEFAULT_MAX_ITEM_LEVEL,
            item_deny_list: Vec::new(),
            item_allow_list: Vec::new(),
            gem_deny_list: Vec::new(),
            gem_allow_list: Vec::new(),
            deny_name_patterns: Vec::new(),
        }
    }
}

/// Compiled filter configuration
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub max_item_level: i32,
    pub item_deny_list: HashSet<i32>,
    pub item_allow_list: HashSet<i32>,
    pub gem_deny_list: HashSet<i32>,
    pub gem_allow_list: HashSet<i32>,
    pub deny_name_patterns: Vec<Regex>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_item_level: DEFAULT_MAX_ITEM_LEVEL,
            item_deny_list: HashSet::new(),
            item_allow_list: HashSet::new(),
            gem_deny_list: HashSet::new(),
            gem_allow_list: HashSet::new(),
            deny_name_patterns: Vec::new(),
        }
    }
}

impl TryFrom<FilterSettings> for FilterConfig {
    type Error = DbError;

    fn try_from(settings: FilterSettings) -> Result<Self> {
        let deny_name_patterns = settings
            .deny_name_patterns
            .into_iter()
            .map(|pattern| {
                Regex::new(&pattern).map_err(|source| DbError::InvalidPattern { pattern, source })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            max_item_level: settings.max_item_level,
            item_deny_list: settings.item_deny_list.into_iter().collect(),
            item_allow_list: settings.item_allow_list.into_iter().collect(),
            gem_deny_list: settings.gem_deny_list.into_iter().collect(),
            gem_allow_list: settings.gem_allow_list.into_iter().collect(),
            deny_name_patterns,
        })
    }
}

impl FilterConfig {
    /// Whether a name matches any deny pattern
    pub fn is_denied_name(&self, name: &str) -> bool {
        self.deny_name_patterns.iter().any(|p| p.is_match(name))
    }
}

/// Name marker identifying an unobtainable duplicate of another item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantMarker {
    Prefix(&'static str),
    Suffix(&'static str),
}

impl VariantMarker {
    /// Name with the marker removed, if the name carries the marker
    pub fn base_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        match self {
            Self::Prefix(prefix) => name.strip_prefix(*prefix),
            Self::Suffix(suffix) => name.strip_suffix(*suffix),
        }
    }
}

impl std::fmt::Display for VariantMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prefix(p) => write!(f, "prefix '{}'", p.trim()),
            Self::Suffix(s) => write!(f, "suffix '{}'", s.trim()),
        }
    }
}

/// One pass of the global pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Deny-listed IDs, deny-pattern names, and items over the level cap
    ItemDenyList,
    /// Drop base items shadowed by a marked duplicate
    VariantDedup(VariantMarker),
    /// Drop the higher-ID copy of duplicated tier set pieces
    DuplicateTierSet,
    GemDenyList,
    /// Clear the unique flag on gems that are not actually unique
    GemUniqueness,
    /// Drop icons without a name or asset key
    IconSanity,
    /// Attach faction restrictions to every item
    FactionAttach,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemDenyList => write!(f, "item deny list"),
            Self::VariantDedup(marker) => write!(f, "variant dedup ({})", marker),
            Self::DuplicateTierSet => write!(f, "duplicate tier set"),
            Self::GemDenyList => write!(f, "gem deny list"),
            Self::GemUniqueness => write!(f, "gem uniqueness"),
            Self::IconSanity => write!(f, "icon sanity"),
            Self::FactionAttach => write!(f, "faction attach"),
        }
    }
}

/// Stages in the order they must run.
///
/// The variant dedup stages compare names of the deny-filtered set, so they
/// come after the deny list; the three of them commute with each other.
pub const GLOBAL_STAGES: &[Stage] = &[
    Stage::ItemDenyList,
    // Unavailable copies of the naxx sets
    Stage::VariantDedup(VariantMarker::Prefix("Heroes' ")),
    // Unavailable copies of tier 8 pieces
    Stage::VariantDedup(VariantMarker::Prefix("Valorous ")),
    // Unavailable copies of tier 9 pieces
    Stage::VariantDedup(VariantMarker::Suffix(" of Triumph")),
    Stage::DuplicateTierSet,
    Stage::GemDenyList,
    Stage::GemUniqueness,
    Stage::IconSanity,
    Stage::FactionAttach,
];

/// Runs the global stages against a database
pub struct Pipeline<'a> {
    config: &'a FilterConfig,
    factions: &'a FactionMap,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a FilterConfig, factions: &'a FactionMap) -> Self {
        Self { config, factions }
    }

    /// Run every stage of [`GLOBAL_STAGES`] in order
    pub fn run(&self, db: &mut Database) {
        for &stage in GLOBAL_STAGES {
            self.run_stage(stage, db);
        }
    }

    /// Run a single stage, returning how many entries it removed or changed
    pub fn run_stage(&self, stage: Stage, db: &mut Database) -> usize {
        let affected = match stage {
            Stage::ItemDenyList => self.deny_items(db),
            Stage::VariantDedup(marker) => dedup_variants(db, marker),
            Stage::DuplicateTierSet => dedup_tier_sets(db),
            Stage::GemDenyList => self.deny_gems(db),
            Stage::GemUniqueness => normalize_gem_uniqueness(db),
            Stage::IconSanity => drop_incomplete_icons(db),
            Stage::FactionAttach => attach_factions(db, self.factions),
        };
        debug!(stage = %stage, affected, "filter stage done");
        affected
    }

    fn deny_items(&self, db: &mut Database) -> usize {
        let before = db.items.len();
        db.items.retain(|_, item| {
            !self.config.item_deny_list.contains(&item.id)
                && item.ilvl <= self.config.max_item_level
                && !self.config.is_denied_name(&item.name)
        });
        before - db.items.len()
    }

    fn deny_gems(&self, db: &mut Database) -> usize {
        let before = db.gems.len();
        db.gems.retain(|_, gem| {
            !self.config.gem_deny_list.contains(&gem.id) && !self.config.is_denied_name(&gem.name)
        });
        before - db.gems.len()
    }
}

/// Remove every item whose name equals the base name of a marked item
fn dedup_variants(db: &mut Database, marker: VariantMarker) -> usize {
    let shadowed: HashSet<String> = db
        .items
        .values()
        .filter_map(|item| marker.base_name(&item.name))
        .map(str::to_string)
        .collect();

    let before = db.items.len();
    db.items.retain(|_, item| !shadowed.contains(&item.name));
    before - db.items.len()
}

/// Keep only the lowest ID among set pieces sharing a name at the duplicate level
fn dedup_tier_sets(db: &mut Database) -> usize {
    let mut lowest: HashMap<String, i32> = HashMap::new();
    for item in db.items.values() {
        if !item.set_name.is_empty() && item.ilvl == DUPLICATE_SET_ILVL {
            lowest
                .entry(item.name.clone())
                .and_modify(|id| *id = (*id).min(item.id))
                .or_insert(item.id);
        }
    }

    let before = db.items.len();
    db.items.retain(|_, item| {
        item.ilvl != DUPLICATE_SET_ILVL
            || lowest.get(&item.name).map_or(true, |&min_id| item.id <= min_id)
    });
    before - db.items.len()
}

fn normalize_gem_uniqueness(db: &mut Database) -> usize {
    let mut changed = 0;
    for gem in db.gems.values_mut() {
        if gem.name.ends_with(NON_UNIQUE_GEM_SUFFIX) && gem.unique {
            gem.unique = false;
            changed += 1;
        }
    }
    changed
}

fn drop_incomplete_icons(db: &mut Database) -> usize {
    let before = db.item_icons.len() + db.spell_icons.len();
    db.item_icons.retain(|_, icon| icon.is_complete());
    db.spell_icons.retain(|_, icon| icon.is_complete());
    before - db.item_icons.len() - db.spell_icons.len()
}

fn attach_factions(db: &mut Database, factions: &FactionMap) -> usize {
    let mut restricted = 0;
    for item in db.items.values_mut() {
        item.faction_restriction = factions.get(&item.id).copied().unwrap_or_default();
        if item.faction_restriction != FactionRestriction::Unrestricted {
            restricted += 1;
        }
    }
    restricted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gem, IconData, Item, ItemQuality};

    fn item(id: i32, name: &str, ilvl: i32) -> Item {
        Item {
            id,
            name: name.to_string(),
            ilvl,
            quality: ItemQuality::Epic,
            ..Default::default()
        }
    }

    fn db_with(items: Vec<Item>) -> Database {
        let mut db = Database::new();
        db.merge_items(items).unwrap();
        db
    }

    fn config(settings: FilterSettings) -> FilterConfig {
        FilterConfig::try_from(settings).unwrap()
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(GLOBAL_STAGES.first(), Some(&Stage::ItemDenyList));
        assert_eq!(GLOBAL_STAGES.last(), Some(&Stage::FactionAttach));
        let dedup_positions: Vec<usize> = GLOBAL_STAGES
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Stage::VariantDedup(_)))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(dedup_positions, vec![1, 2, 3]);
        let tier_position = GLOBAL_STAGES
            .iter()
            .position(|s| *s == Stage::DuplicateTierSet)
            .unwrap();
        assert!(tier_position > 3);
    }

    #[test]
    fn test_heroes_variant_removes_base() {
        let mut db = db_with(vec![
            item(100, "Heroes' Gauntlets", 200),
            item(101, "Gauntlets", 200),
        ]);
        let cfg = FilterConfig::default();
        let factions = FactionMap::new();
        let removed = Pipeline::new(&cfg, &factions).run_stage(
            Stage::VariantDedup(VariantMarker::Prefix("Heroes' ")),
            &mut db,
        );
        assert_eq!(removed, 1);
        assert!(db.items.contains_key(&100));
        assert!(!db.items.contains_key(&101));
    }

    #[test]
    fn test_triumph_suffix_removes_base() {
        let mut db = db_with(vec![
            item(48842, "Thrall's Hauberk of Triumph", 245),
            item(48843, "Thrall's Hauberk", 245),
            item(48844, "Thrall's Helm", 245),
        ]);
        dedup_variants(&mut db, VariantMarker::Suffix(" of Triumph"));
        let ids: Vec<i32> = db.items.keys().copied().collect();
        assert_eq!(ids, vec![48842, 48844]);
    }

    #[test]
    fn test_variant_dedup_ignores_unmatched_names() {
        let mut db = db_with(vec![
            item(1, "Valorous Darkruned Gauntlets", 226),
            item(2, "Darkruned Handguards", 226),
        ]);
        assert_eq!(dedup_variants(&mut db, VariantMarker::Prefix("Valorous ")), 0);
        assert_eq!(db.items.len(), 2);
    }

    #[test]
    fn test_deny_list_runs_before_variant_dedup() {
        // The marked item is denied, so its base item must survive.
        let mut db = db_with(vec![
            item(100, "Heroes' Gauntlets", 200),
            item(101, "Gauntlets", 200),
        ]);
        let cfg = config(FilterSettings {
            item_deny_list: vec![100],
            ..Default::default()
        });
        let factions = FactionMap::new();
        Pipeline::new(&cfg, &factions).run(&mut db);
        let ids: Vec<i32> = db.items.keys().copied().collect();
        assert_eq!(ids, vec![101]);
    }

    #[test]
    fn test_item_deny_list_ids_patterns_and_level_cap() {
        let mut db = db_with(vec![
            item(1, "Denied By Id", 200),
            item(2, "Monster - Test Sword", 200),
            item(3, "Too Strong", 417),
            item(4, "At The Cap", 416),
        ]);
        let cfg = config(FilterSettings {
            item_deny_list: vec![1],
            deny_name_patterns: vec!["^Monster - ".to_string()],
            ..Default::default()
        });
        let factions = FactionMap::new();
        let removed = Pipeline::new(&cfg, &factions).run_stage(Stage::ItemDenyList, &mut db);
        assert_eq!(removed, 3);
        assert_eq!(db.items.keys().copied().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = FilterConfig::try_from(FilterSettings {
            deny_name_patterns: vec!["(unclosed".to_string()],
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, DbError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_duplicate_tier_set_keeps_lowest_id() {
        let tier = |id| Item {
            set_name: "Tier10".to_string(),
            ..item(id, "Chestplate", DUPLICATE_SET_ILVL)
        };
        let mut db = db_with(vec![tier(600), tier(500), item(700, "Chestplate", 264)]);
        let removed = dedup_tier_sets(&mut db);
        assert_eq!(removed, 1);
        assert!(db.items.contains_key(&500));
        assert!(!db.items.contains_key(&600));
        assert!(db.items.contains_key(&700));
    }

    #[test]
    fn test_duplicate_tier_set_needs_set_marker() {
        let mut db = db_with(vec![
            item(500, "Chestplate", DUPLICATE_SET_ILVL),
            item(600, "Chestplate", DUPLICATE_SET_ILVL),
        ]);
        assert_eq!(dedup_tier_sets(&mut db), 0);
        assert_eq!(db.items.len(), 2);
    }

    #[test]
    fn test_gem_deny_and_uniqueness() {
        let mut db = Database::new();
        db.merge_gems(vec![
            Gem {
                id: 42142,
                name: "Bold Dragon's Eye".to_string(),
                unique: true,
                ..Default::default()
            },
            Gem {
                id: 32836,
                name: "Purified Shadow Pearl".to_string(),
                ..Default::default()
            },
            Gem {
                id: 33140,
                name: "Blood of Amber".to_string(),
                ..Default::default()
            },
            Gem {
                id: 35501,
                name: "Brilliant Stormjewel".to_string(),
                unique: true,
                ..Default::default()
            },
        ])
        .unwrap();
        let cfg = config(FilterSettings {
            gem_deny_list: vec![32836],
            deny_name_patterns: vec!["Amber$".to_string()],
            ..Default::default()
        });
        let factions = FactionMap::new();
        let pipeline = Pipeline::new(&cfg, &factions);
        assert_eq!(pipeline.run_stage(Stage::GemDenyList, &mut db), 2);
        assert_eq!(pipeline.run_stage(Stage::GemUniqueness, &mut db), 1);
        assert!(db.gems[&42142].unique);
        assert!(!db.gems[&35501].unique);
    }

    #[test]
    fn test_icon_sanity() {
        let mut db = Database::new();
        db.item_icons.insert(
            1,
            IconData {
                id: 1,
                name: String::new(),
                icon: "inv_sword_01".to_string(),
            },
        );
        db.spell_icons.insert(
            2,
            IconData {
                id: 2,
                name: "Frostbolt".to_string(),
                icon: "spell_frost_frostbolt02".to_string(),
            },
        );
        db.spell_icons.insert(
            3,
            IconData {
                id: 3,
                name: "Nameless".to_string(),
                icon: String::new(),
            },
        );
        assert_eq!(drop_incomplete_icons(&mut db), 2);
        assert!(db.item_icons.is_empty());
        assert_eq!(db.spell_icons.keys().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_faction_attach_defaults_to_unrestricted() {
        let mut stale = item(2, "Neutral Blade", 200);
        stale.faction_restriction = FactionRestriction::AllianceOnly;
        let mut db = db_with(vec![item(1, "Alliance Blade", 200), stale]);
        let factions = FactionMap::from([(1, FactionRestriction::AllianceOnly)]);
        assert_eq!(attach_factions(&mut db, &factions), 1);
        assert_eq!(db.items[&1].faction_restriction, FactionRestriction::AllianceOnly);
        assert_eq!(db.items[&2].faction_restriction, FactionRestriction::Unrestricted);
    }
}
