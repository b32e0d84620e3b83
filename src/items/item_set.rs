//! Item sets: extra bonuses for wearing several pieces of the same set

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::bonus::ItemBonus;
use crate::core::error::{Result, SimError};
use crate::core::types::SetId;

/// Bonus granted when exactly `count` pieces of `set` are equipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSetStage {
    pub set: SetId,
    pub count: usize,
    pub bonus: ItemBonus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSet {
    pub id: SetId,
    pub name: String,
    pub stages: Vec<ItemSetStage>,
}

impl ItemSet {
    pub fn new(id: impl Into<SetId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            stages: Vec::new(),
        }
    }

    pub fn with_stage(mut self, count: usize, bonus: ItemBonus) -> Self {
        self.stages.push(ItemSetStage {
            set: self.id.clone(),
            count,
            bonus,
        });
        self
    }

    pub fn stage(&self, count: usize) -> Option<&ItemSetStage> {
        self.stages.iter().find(|s| s.count == count)
    }
}

/// All known sets, indexed by key
#[derive(Debug, Clone, Default)]
pub struct ItemSetList {
    sets: AHashMap<SetId, ItemSet>,
}

impl ItemSetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, set: ItemSet) {
        self.sets.insert(set.id.clone(), set);
    }

    pub fn get(&self, id: &SetId) -> Option<&ItemSet> {
        self.sets.get(id)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Stage active for `count` equipped pieces, if the set defines one.
    ///
    /// Counts without a stage give nothing; there is no fallback to a lower stage.
    pub fn active_stage(&self, id: &SetId, count: usize) -> Option<&ItemSetStage> {
        self.sets.get(id).and_then(|set| set.stage(count))
    }

    /// Like `active_stage`, but an undefined stage is an error
    pub fn get_stage(&self, id: &SetId, count: usize) -> Result<&ItemSetStage> {
        self.active_stage(id, count)
            .ok_or_else(|| SimError::UnknownSetStage {
                set: id.clone(),
                count,
            })
    }
}

impl FromIterator<ItemSet> for ItemSetList {
    fn from_iter<I: IntoIterator<Item = ItemSet>>(iter: I) -> Self {
        let mut list = Self::new();
        for set in iter {
            list.insert(set);
        }
        list
    }
}
