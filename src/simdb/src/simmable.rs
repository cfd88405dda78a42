//! Simmable classification and the simmable/leftover partition.
//!
//! Both halves of the partition are produced with the same predicate, the
//! leftover half by inverting it, so every item and gem present before the
//! split ends up in exactly one output.

use tracing::warn;

use crate::database::Database;
use crate::filters::FilterConfig;
use crate::types::{Gem, GemColor, Item, ItemQuality};

/// Uncommon and rare items below this level are not simmable
pub const MIN_GREEN_BLUE_ILVL: i32 = 145;

/// Uncommon and rare items below this level need a set bonus to be simmable
pub const MIN_GREEN_BLUE_ILVL_WITHOUT_SET: i32 = 149;

/// Epic and legendary items below this level are not simmable
pub const MIN_EPIC_ILVL: i32 = 140;

/// Gems below this ID predate the supported content
pub const MIN_GEM_ID: i32 = 39900;

/// Decides which items and gems the simulator cares about
#[derive(Debug, Clone, Copy)]
pub struct SimmablePredicate<'a> {
    config: &'a FilterConfig,
}

impl<'a> SimmablePredicate<'a> {
    pub fn new(config: &'a FilterConfig) -> Self {
        Self { config }
    }

    pub fn is_simmable_item(&self, item: &Item) -> bool {
        if self.config.item_allow_list.contains(&item.id) {
            return true;
        }

        match item.quality {
            q if q < ItemQuality::Uncommon => false,
            ItemQuality::Artifact => false,
            q if q > ItemQuality::Heirloom => false,
            q if q < ItemQuality::Epic => {
                item.ilvl >= MIN_GREEN_BLUE_ILVL
                    && (item.ilvl >= MIN_GREEN_BLUE_ILVL_WITHOUT_SET || !item.set_name.is_empty())
            }
            ItemQuality::Heirloom => true,
            // Epics and legendaries may come from older content, hence the lower bar
            _ => item.ilvl >= MIN_EPIC_ILVL,
        }
    }

    pub fn is_simmable_gem(&self, gem: &Gem) -> bool {
        if self.config.gem_allow_list.contains(&gem.id) {
            return true;
        }
        if gem.color == GemColor::Meta {
            return true;
        }
        if gem.id < MIN_GEM_ID {
            return false;
        }
        gem.quality >= ItemQuality::Uncommon
    }
}

/// The two disjoint outputs of a build
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub simmable: Database,
    pub leftover: Database,
}

/// Keep only simmable items and gems
pub fn apply_simmable_filters(db: &mut Database, predicate: &SimmablePredicate<'_>) {
    db.items.retain(|_, item| predicate.is_simmable_item(item));
    db.gems.retain(|_, gem| predicate.is_simmable_gem(gem));

    for item in db.items.values().filter(|item| item.ilvl == 0) {
        warn!(id = item.id, name = %item.name, "Missing ilvl");
    }
}

/// Keep only items and gems that are not simmable
pub fn apply_leftover_filters(db: &mut Database, predicate: &SimmablePredicate<'_>) {
    db.items.retain(|_, item| !predicate.is_simmable_item(item));
    db.gems.retain(|_, gem| !predicate.is_simmable_gem(gem));
}

/// Split a filtered database into its simmable and leftover halves
pub fn partition(mut db: Database, predicate: &SimmablePredicate<'_>) -> Partition {
    let mut leftover = db.snapshot();
    apply_leftover_filters(&mut leftover, predicate);
    apply_simmable_filters(&mut db, predicate);
    Partition {
        simmable: db,
        leftover,
    }
}
