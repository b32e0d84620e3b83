//! Slot→item assignments and the combinator that enumerates them

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

use crate::core::types::{ItemId, Slot, SLOT_COUNT};
use crate::items::{ItemModel, ItemModelList};

/// One complete slot→item assignment. Empty slots hold `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Permutation {
    items: [Option<Arc<ItemModel>>; SLOT_COUNT],
}

impl Permutation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&Arc<ItemModel>> {
        self.items[slot.index()].as_ref()
    }

    pub fn set(&mut self, slot: Slot, item: Option<Arc<ItemModel>>) {
        self.items[slot.index()] = item;
    }

    pub fn with(mut self, slot: Slot, item: Option<Arc<ItemModel>>) -> Self {
        self.set(slot, item);
        self
    }

    /// Every slot with its occupant, in `Slot::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<&Arc<ItemModel>>)> {
        Slot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    /// Occupied slots only
    pub fn equipped(&self) -> impl Iterator<Item = (Slot, &Arc<ItemModel>)> {
        self.iter().filter_map(|(slot, item)| item.map(|i| (slot, i)))
    }

    pub fn is_empty(&self) -> bool {
        self.items.iter().all(Option::is_none)
    }

    /// Item ids per slot, usable as a hash key
    pub fn key(&self) -> [Option<ItemId>; SLOT_COUNT] {
        let mut key = [None; SLOT_COUNT];
        for (out, item) in key.iter_mut().zip(self.items.iter()) {
            *out = item.as_ref().map(|i| i.id);
        }
        key
    }
}

/// Serialized as `{ "weapon": 41000, ... }` with empty slots left out
impl Serialize for Permutation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.equipped().count()))?;
        for (slot, item) in self.equipped() {
            map.serialize_entry(slot.name(), &item.id)?;
        }
        map.end()
    }
}

/// Per-slot candidate lists for a search
#[derive(Debug, Clone)]
pub struct CandidateLists {
    slots: [Vec<Option<Arc<ItemModel>>>; SLOT_COUNT],
}

impl Default for CandidateLists {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateLists {
    /// Every slot starts with the single "no item" option
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| vec![None]),
        }
    }

    /// Group `items` by slot. With `include_empty` every slot that has
    /// candidates also gets an explicit "no item" option.
    pub fn from_items(items: &ItemModelList, include_empty: bool) -> Self {
        let mut lists = Self::new();
        for slot in Slot::ALL {
            let mut candidates: Vec<Option<Arc<ItemModel>>> =
                items.for_slot(slot).into_iter().map(Some).collect();
            if include_empty && !candidates.is_empty() {
                candidates.push(None);
            }
            lists.set(slot, candidates);
        }
        lists
    }

    /// Replace the candidates of `slot`; an empty list means "no item"
    pub fn set(&mut self, slot: Slot, candidates: Vec<Option<Arc<ItemModel>>>) {
        self.slots[slot.index()] = if candidates.is_empty() {
            vec![None]
        } else {
            candidates
        };
    }

    pub fn with_items(mut self, slot: Slot, items: Vec<ItemModel>) -> Self {
        self.set(slot, items.into_iter().map(|i| Some(Arc::new(i))).collect());
        self
    }

    pub fn get(&self, slot: Slot) -> &[Option<Arc<ItemModel>>] {
        &self.slots[slot.index()]
    }

    /// Total number of permutations: product of the per-slot list sizes
    pub fn calc_permutations(&self) -> u128 {
        self.slots
            .iter()
            .fold(1u128, |acc, list| acc.saturating_mul(list.len() as u128))
    }

    /// Lazily enumerate every permutation exactly once
    pub fn permutations(&self) -> PermutationIter<'_> {
        PermutationIter {
            lists: self,
            indices: [0; SLOT_COUNT],
            remaining: self.calc_permutations(),
        }
    }
}

/// Odometer over the candidate lists: `Slot::Weapon` turns slowest,
/// `Slot::Product` fastest.
pub struct PermutationIter<'a> {
    lists: &'a CandidateLists,
    indices: [usize; SLOT_COUNT],
    remaining: u128,
}

impl<'a> Iterator for PermutationIter<'a> {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        if self.remaining == 0 {
            return None;
        }

        let mut permutation = Permutation::new();
        for slot in Slot::ALL {
            let candidates = self.lists.get(slot);
            permutation.set(slot, candidates[self.indices[slot.index()]].clone());
        }

        self.remaining -= 1;
        for slot in Slot::ALL.iter().rev() {
            let i = slot.index();
            self.indices[i] += 1;
            if self.indices[i] < self.lists.get(*slot).len() {
                break;
            }
            self.indices[i] = 0;
        }

        Some(permutation)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
