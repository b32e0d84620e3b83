//! Equipment slot aggregate
//!
//! Holds one optional item per slot and derives the totals the fitness rules
//! read. Totals are computed on first access and cached until a slot changes.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::permutations::Permutation;
use super::snapshot::EquipmentPermutationData;
use crate::core::error::{Result, SimError};
use crate::core::types::{SetId, Slot};
use crate::items::{ItemModel, ItemSetList, ItemSetStage, ResolvedBonus};
use crate::stats::{Skills, WeaponDamage};

#[derive(Debug, Clone)]
struct Totals {
    bonus: ResolvedBonus,
    active_stages: Vec<ItemSetStage>,
}

#[derive(Debug, Clone)]
pub struct EquipmentSimul {
    slots: Permutation,
    sets: Arc<ItemSetList>,
    player_level: u32,
    totals: OnceCell<Totals>,
}

fn slot_of(item: &ItemModel) -> Result<Slot> {
    item.slot().ok_or(SimError::NotEquippable(item.item_type))
}

impl EquipmentSimul {
    pub fn new(sets: Arc<ItemSetList>, player_level: u32) -> Self {
        Self {
            slots: Permutation::new(),
            sets,
            player_level,
            totals: OnceCell::new(),
        }
    }

    pub fn player_level(&self) -> u32 {
        self.player_level
    }

    pub fn set_player_level(&mut self, player_level: u32) {
        self.player_level = player_level;
        self.invalidate();
    }

    pub fn get(&self, slot: Slot) -> Option<&Arc<ItemModel>> {
        self.slots.get(slot)
    }

    pub fn permutation(&self) -> &Permutation {
        &self.slots
    }

    fn invalidate(&mut self) {
        self.totals = OnceCell::new();
    }

    /// Put `item` into `slot`, returning the previous occupant
    pub fn set_slot(
        &mut self,
        slot: Slot,
        item: Option<Arc<ItemModel>>,
    ) -> Result<Option<Arc<ItemModel>>> {
        if let Some(item) = &item {
            let found = slot_of(item)?;
            if found != slot {
                return Err(SimError::SlotMismatch {
                    expected: slot,
                    found,
                });
            }
        }
        let previous = self.slots.get(slot).cloned();
        self.slots.set(slot, item);
        self.invalidate();
        Ok(previous)
    }

    /// Swap `replaced` for `replacement` in the slot matching their item type.
    ///
    /// Either side may be absent (equip into or clear a slot), not both.
    /// Both present must share a slot type.
    pub fn replace_item(
        &mut self,
        replaced: Option<&ItemModel>,
        replacement: Option<Arc<ItemModel>>,
    ) -> Result<Option<Arc<ItemModel>>> {
        let slot = match (replaced, replacement.as_deref()) {
            (None, None) => return Err(SimError::NothingToReplace),
            (Some(old), Some(new)) => {
                let expected = slot_of(old)?;
                let found = slot_of(new)?;
                if expected != found {
                    return Err(SimError::SlotMismatch { expected, found });
                }
                expected
            }
            (Some(old), None) => slot_of(old)?,
            (None, Some(new)) => slot_of(new)?,
        };
        self.set_slot(slot, replacement)
    }

    /// Install every slot of `permutation`
    pub fn apply(&mut self, permutation: &Permutation) -> Result<()> {
        for (slot, item) in permutation.iter() {
            self.set_slot(slot, item.cloned())?;
        }
        Ok(())
    }

    /// Clear all slots
    pub fn empty(&mut self) {
        self.slots = Permutation::new();
        self.invalidate();
    }

    /// Independent copy; slot and stage containers are not shared
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn totals(&self) -> &Totals {
        self.totals.get_or_init(|| self.aggregate())
    }

    fn aggregate(&self) -> Totals {
        let mut bonus = ResolvedBonus::default();
        let mut set_counts: BTreeMap<&SetId, usize> = BTreeMap::new();

        for (_, item) in self.slots.equipped() {
            bonus += &item.bonus.resolve(self.player_level);
            if let Some(set) = &item.set {
                *set_counts.entry(set).or_insert(0) += 1;
            }
        }

        let mut active_stages = Vec::new();
        for (set, count) in set_counts {
            if let Some(stage) = self.sets.active_stage(set, count) {
                bonus += &stage.bonus.resolve(self.player_level);
                active_stages.push(stage.clone());
            }
        }

        Totals {
            bonus,
            active_stages,
        }
    }

    pub fn item_drop(&self) -> f64 {
        self.totals().bonus.item_drop
    }

    pub fn product_drop(&self) -> f64 {
        self.totals().bonus.product_drop
    }

    pub fn workpoints(&self) -> f64 {
        self.totals().bonus.workpoints
    }

    pub fn regeneration(&self) -> f64 {
        self.totals().bonus.regeneration
    }

    /// Flat damage bonus from items and sets
    pub fn damage(&self) -> f64 {
        self.totals().bonus.damage
    }

    pub fn speed(&self) -> f64 {
        self.totals().bonus.speed
    }

    pub fn exp_bonus(&self) -> f64 {
        self.totals().bonus.exp_bonus
    }

    pub fn skills(&self) -> Skills {
        self.totals().bonus.skills
    }

    pub fn active_set_stages(&self) -> &[ItemSetStage] {
        &self.totals().active_stages
    }

    /// Weapon range plus the flat damage bonus
    pub fn weapon_damage(&self) -> WeaponDamage {
        let base = self
            .slots
            .get(Slot::Weapon)
            .and_then(|w| w.damage_range)
            .unwrap_or_default();
        base + self.damage()
    }

    pub fn snapshot(&self) -> EquipmentPermutationData {
        let bonus = &self.totals().bonus;
        EquipmentPermutationData {
            item_drop: bonus.item_drop,
            product_drop: bonus.product_drop,
            exp_bonus: bonus.exp_bonus,
            workpoints: bonus.workpoints,
            regeneration: bonus.regeneration,
            speed: bonus.speed,
            weapon_damage: self.weapon_damage(),
            skills: bonus.skills,
            permutation: self.slots.clone(),
        }
    }
}
