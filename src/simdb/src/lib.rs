//! Item database reconciliation for gear simulation
//!
//! Builds the item, gem and enchant database the simulator ships with by
//! merging several partial sources, running an ordered set of filters, and
//! splitting the result into a simmable database and a leftover database.
//!
//! # Example
//!
//! ```no_run
//! use simdb::{build, BuildInputs};
//!
//! let inputs = BuildInputs::default();
//! let output = build(inputs).unwrap();
//! println!("{}", output.full.counts());
//! ```

pub mod build;
pub mod database;
pub mod error;
pub mod filters;
pub mod icons;
pub mod merge;
pub mod overrides;
pub mod simmable;
pub mod sources;
pub mod talents;
pub mod types;

pub use types::*;

pub use build::{build, BuildInputs, BuildOutput};
pub use database::{Database, DbCounts};
pub use error::{DbError, Result};
pub use filters::{FactionMap, FilterConfig, FilterSettings, Pipeline, Stage, GLOBAL_STAGES};
pub use icons::{attach_icons, IconReport, IconRequests, IconSources};
pub use merge::{Merge, Override};
pub use overrides::{EnchantOverride, GemOverride, ItemOverride, Overrides};
pub use simmable::{partition, Partition, SimmablePredicate};
pub use sources::{ItemTooltip, LootDatabase, SpellTooltip, TooltipClass};
pub use talents::{tree_spell_ids, TalentConfig, TalentTreeConfig};
