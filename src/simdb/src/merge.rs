//! Field-level merge rules.
//!
//! Sources arrive in a fixed order (tooltips, gear planner, loot tables,
//! manual overrides) and each later source is treated as more specific:
//!
//! - a scalar field is taken from the incoming record unless the incoming
//!   value is the zero value, so an unset field never clears a set one
//! - collections accumulate, skipping values that are already present
//! - overrides replace every field they specify, zero values included

use crate::overrides::{EnchantOverride, GemOverride, ItemOverride};
use crate::types::{Enchant, EnchantKey, EntityKind, Gem, Item, Record};

/// A record that can absorb a later observation of the same entity
pub trait Merge: Record + Sized {
    const KIND: EntityKind;

    fn merge_from(&mut self, incoming: Self);
}

/// A partial record that is applied on top of a merged one
pub trait Override {
    type Target: Merge;

    fn target_key(&self) -> <Self::Target as Record>::Key;

    fn has_valid_key(&self) -> bool;

    /// Empty record carrying only the key, used when no source produced one
    fn seed(&self) -> Self::Target;

    fn apply_to(&self, target: &mut Self::Target);
}

/// Take `incoming` unless it is the zero value
pub fn merge_scalar<T: PartialEq + Default>(field: &mut T, incoming: T) {
    if incoming != T::default() {
        *field = incoming;
    }
}

/// Append values of `incoming` not already in `field`
pub fn merge_collection<T: PartialEq>(field: &mut Vec<T>, incoming: Vec<T>) {
    for value in incoming {
        if !field.contains(&value) {
            field.push(value);
        }
    }
}

fn set_if_some<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}

impl Merge for Item {
    const KIND: EntityKind = EntityKind::Item;

    fn merge_from(&mut self, incoming: Self) {
        merge_scalar(&mut self.name, incoming.name);
        merge_scalar(&mut self.item_type, incoming.item_type);
        merge_scalar(&mut self.ilvl, incoming.ilvl);
        merge_scalar(&mut self.quality, incoming.quality);
        merge_scalar(&mut self.set_name, incoming.set_name);
        merge_scalar(&mut self.phase, incoming.phase);
        merge_scalar(&mut self.unique, incoming.unique);
        merge_scalar(&mut self.heroic, incoming.heroic);
        merge_scalar(&mut self.faction_restriction, incoming.faction_restriction);
        merge_collection(&mut self.sources, incoming.sources);
    }
}

impl Merge for Gem {
    const KIND: EntityKind = EntityKind::Gem;

    fn merge_from(&mut self, incoming: Self) {
        merge_scalar(&mut self.name, incoming.name);
        merge_scalar(&mut self.color, incoming.color);
        merge_scalar(&mut self.quality, incoming.quality);
        merge_scalar(&mut self.unique, incoming.unique);
        merge_scalar(&mut self.phase, incoming.phase);
    }
}

impl Merge for Enchant {
    const KIND: EntityKind = EntityKind::Enchant;

    // Key fields are equal by construction.
    fn merge_from(&mut self, incoming: Self) {
        merge_scalar(&mut self.name, incoming.name);
        merge_scalar(&mut self.quality, incoming.quality);
        merge_scalar(&mut self.phase, incoming.phase);
    }
}

impl Override for ItemOverride {
    type Target = Item;

    fn target_key(&self) -> i32 {
        self.id
    }

    fn has_valid_key(&self) -> bool {
        self.id != 0
    }

    fn seed(&self) -> Item {
        Item {
            id: self.id,
            ..Default::default()
        }
    }

    fn apply_to(&self, item: &mut Item) {
        set_if_some(&mut item.name, &self.name);
        set_if_some(&mut item.item_type, &self.item_type);
        set_if_some(&mut item.ilvl, &self.ilvl);
        set_if_some(&mut item.quality, &self.quality);
        set_if_some(&mut item.set_name, &self.set_name);
        set_if_some(&mut item.phase, &self.phase);
        set_if_some(&mut item.unique, &self.unique);
        set_if_some(&mut item.heroic, &self.heroic);
        set_if_some(&mut item.sources, &self.sources);
    }
}

impl Override for GemOverride {
    type Target = Gem;

    fn target_key(&self) -> i32 {
        self.id
    }

    fn has_valid_key(&self) -> bool {
        self.id != 0
    }

    fn seed(&self) -> Gem {
        Gem {
            id: self.id,
            ..Default::default()
        }
    }

    fn apply_to(&self, gem: &mut Gem) {
        set_if_some(&mut gem.name, &self.name);
        set_if_some(&mut gem.color, &self.color);
        set_if_some(&mut gem.quality, &self.quality);
        set_if_some(&mut gem.unique, &self.unique);
        set_if_some(&mut gem.phase, &self.phase);
    }
}

impl Override for EnchantOverride {
    type Target = Enchant;

    fn target_key(&self) -> EnchantKey {
        EnchantKey {
            effect_id: self.effect_id,
            item_id: self.item_id,
            spell_id: self.spell_id,
        }
    }

    fn has_valid_key(&self) -> bool {
        self.effect_id != 0 || self.item_id != 0 || self.spell_id != 0
    }

    fn seed(&self) -> Enchant {
        Enchant {
            effect_id: self.effect_id,
            item_id: self.item_id,
            spell_id: self.spell_id,
            ..Default::default()
        }
    }

    fn apply_to(&self, enchant: &mut Enchant) {
        set_if_some(&mut enchant.name, &self.name);
        set_if_some(&mut enchant.quality, &self.quality);
        set_if_some(&mut enchant.phase, &self.phase);
    }
}
