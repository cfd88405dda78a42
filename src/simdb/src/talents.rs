//! Talent tree configuration and rank spell ID inference.

use serde::{Deserialize, Serialize};

use crate::error::{DbError, Result};

/// One talent of a tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentConfig {
    pub field_name: String,
    /// Spell IDs per rank; later ranks may be omitted
    pub spell_ids: Vec<i32>,
    pub max_points: i32,
}

/// A talent tree as shipped with the simulator UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentTreeConfig {
    pub name: String,
    pub background_url: String,
    pub talents: Vec<TalentConfig>,
}

/// Most ranks a single talent may declare
pub const MAX_TALENT_RANKS: i32 = 10;

impl TalentConfig {
    /// Spell IDs for every rank.
    ///
    /// Missing ranks are filled by counting up from the last listed ID.
    pub fn rank_spell_ids(&self, tree: &str) -> Result<Vec<i32>> {
        let Some(&last) = self.spell_ids.last() else {
            if self.max_points > 0 {
                return Err(DbError::MissingTalentSeed {
                    tree: tree.to_string(),
                    talent: self.field_name.clone(),
                    max_points: self.max_points,
                });
            }
            return Ok(Vec::new());
        };

        let overflow = || DbError::TalentRankOverflow {
            tree: tree.to_string(),
            talent: self.field_name.clone(),
            seed: last,
            max_points: self.max_points,
        };
        if self.max_points > MAX_TALENT_RANKS {
            return Err(overflow());
        }

        let mut ids = self.spell_ids.clone();
        let listed = i32::try_from(ids.len()).map_err(|_| overflow())?;
        for offset in 1..=self.max_points.saturating_sub(listed) {
            ids.push(last.checked_add(offset).ok_or_else(overflow)?);
        }
        Ok(ids)
    }
}

impl TalentTreeConfig {
    /// Spell IDs for every rank of every talent in the tree
    pub fn spell_ids(&self) -> Result<Vec<i32>> {
        let mut ids = Vec::new();
        for talent in &self.talents {
            ids.extend(talent.rank_spell_ids(&self.name)?);
        }
        Ok(ids)
    }
}

/// Spell IDs of every tree in a talent file
pub fn tree_spell_ids(trees: &[TalentTreeConfig]) -> Result<Vec<i32>> {
    let mut ids = Vec::new();
    for tree in trees {
        ids.extend(tree.spell_ids()?);
    }
    Ok(ids)
}
