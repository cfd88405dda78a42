//! Icon attachment for the simmable database.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::debug;

use crate::database::Database;
use crate::sources::{ItemTooltip, SpellTooltip};
use crate::types::IconData;

/// Icon lookups built from the tooltip collections
#[derive(Debug, Clone, Default)]
pub struct IconSources {
    items: HashMap<i32, IconData>,
    spells: HashMap<i32, IconData>,
}

impl IconSources {
    pub fn new(item_tooltips: &[ItemTooltip], spell_tooltips: &[SpellTooltip]) -> Self {
        Self {
            items: item_tooltips
                .iter()
                .map(|t| (t.id, t.to_icon()))
                .collect(),
            spells: spell_tooltips
                .iter()
                .map(|t| (t.id, t.to_icon()))
                .collect(),
        }
    }

    pub fn item(&self, id: i32) -> Option<&IconData> {
        self.items.get(&id)
    }

    pub fn spell(&self, id: i32) -> Option<&IconData> {
        self.spells.get(&id)
    }
}

/// Fixed lists of IDs whose icons are wanted regardless of database content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconRequests {
    pub extra_item_icons: Vec<i32>,
    pub shared_spell_icons: Vec<i32>,
    /// Talent spell IDs by tree
    pub talent_spell_ids: BTreeMap<String, Vec<i32>>,
    /// Rotation spell IDs by spec
    pub rotation_spell_ids: BTreeMap<String, Vec<i32>>,
}

/// Outcome of an icon attachment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IconReport {
    pub added: usize,
    pub missing: usize,
}

impl fmt::Display for IconReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} icons added, {} without tooltip", self.added, self.missing)
    }
}

#[derive(Clone, Copy)]
enum IconKind {
    Item,
    Spell,
}

struct Attacher<'a> {
    db: &'a mut Database,
    sources: &'a IconSources,
    report: IconReport,
}

impl Attacher<'_> {
    fn attach(&mut self, kind: IconKind, id: i32) {
        if id == 0 {
            return;
        }
        let found = match kind {
            IconKind::Item => self.sources.item(id),
            IconKind::Spell => self.sources.spell(id),
        };
        let Some(icon) = found else {
            debug!(id, "No tooltip for icon");
            self.report.missing += 1;
            return;
        };
        let stored = match kind {
            IconKind::Item => self.db.add_item_icon(icon.clone()),
            IconKind::Spell => self.db.add_spell_icon(icon.clone()),
        };
        if stored {
            self.report.added += 1;
        }
    }

    fn attach_all(&mut self, kind: IconKind, ids: impl IntoIterator<Item = i32>) {
        for id in ids {
            self.attach(kind, id);
        }
    }
}

/// Add icons for everything the simulator will display.
///
/// Covers every item in the database, both halves of every enchant, crafted
/// source spells, and the extra lists in `requests`. Existing icons are never
/// removed.
pub fn attach_icons(db: &mut Database, sources: &IconSources, requests: &IconRequests) -> IconReport {
    let item_ids: Vec<i32> = db.items.keys().copied().collect();
    let crafted_spells: Vec<i32> = db
        .items
        .values()
        .flat_map(|item| item.crafted_spell_ids())
        .collect();
    let enchant_items: Vec<i32> = db.enchants.values().map(|e| e.item_id).collect();
    let enchant_spells: Vec<i32> = db.enchants.values().map(|e| e.spell_id).collect();

    let mut attacher = Attacher {
        db,
        sources,
        report: IconReport::default(),
    };

    attacher.attach_all(IconKind::Item, item_ids);
    attacher.attach_all(IconKind::Item, enchant_items);
    attacher.attach_all(IconKind::Spell, enchant_spells);
    attacher.attach_all(IconKind::Item, requests.extra_item_icons.iter().copied());
    attacher.attach_all(IconKind::Spell, crafted_spells);
    attacher.attach_all(IconKind::Spell, requests.shared_spell_icons.iter().copied());
    for ids in requests.talent_spell_ids.values() {
        attacher.attach_all(IconKind::Spell, ids.iter().copied());
    }
    for ids in requests.rotation_spell_ids.values() {
        attacher.attach_all(IconKind::Spell, ids.iter().copied());
    }

    attacher.report
}
