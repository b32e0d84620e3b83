//! Item catalog loading and candidate item lists
//!
//! The catalog is the game's JSON item/set dump. An `ItemModelList` is the
//! subset a player can actually equip, narrowed down by the filters below
//! before it is handed to a search.

use ahash::{AHashMap, AHashSet};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::bonus::ItemBonus;
use super::item::ItemModel;
use super::item_set::{ItemSet, ItemSetList};
use super::update_table::UpdateTable;
use crate::core::error::{Result, SimError};
use crate::core::types::{ItemId, ItemType, SetId, Slot};
use crate::stats::{Skills, WeaponDamage};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawBonus {
    attributes: BTreeMap<String, f64>,
    skills: BTreeMap<String, f64>,
    item_drop: f64,
    product_drop: f64,
    workpoints: f64,
    regeneration: f64,
    damage: f64,
    speed: f64,
    exp_bonus: f64,
    level_scaled: Vec<String>,
}

impl RawBonus {
    fn into_bonus(self) -> Result<ItemBonus> {
        let skills = Skills::from_named(
            self.attributes
                .iter()
                .chain(self.skills.iter())
                .map(|(name, value)| (name.as_str(), *value)),
        )?;
        Ok(ItemBonus {
            skills,
            item_drop: self.item_drop,
            product_drop: self.product_drop,
            workpoints: self.workpoints,
            regeneration: self.regeneration,
            damage: self.damage,
            speed: self.speed,
            exp_bonus: self.exp_bonus,
            updates: UpdateTable::from_names(&self.level_scaled)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawDamage {
    min: f64,
    max: f64,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
struct RawItem {
    item_id: u64,
    name: String,
    #[serde(rename = "type")]
    item_type: ItemType,
    #[serde(default)]
    level: u32,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    set: Option<String>,
    #[serde(default)]
    damage: Option<RawDamage>,
    #[serde(default)]
    upgradeable: bool,
    #[serde(default = "default_true")]
    dropable: bool,
    #[serde(default = "default_true")]
    sellable: bool,
    #[serde(default)]
    actionable: bool,
    #[serde(default)]
    mapdrop: bool,
    #[serde(default)]
    bonus: RawBonus,
}

impl RawItem {
    fn into_item(self) -> Result<ItemModel> {
        Ok(ItemModel {
            id: ItemId(self.item_id),
            name: self.name,
            value: self.price,
            item_type: self.item_type,
            level: self.level,
            set: self.set.map(SetId),
            bonus: self.bonus.into_bonus()?,
            damage_range: self.damage.map(|d| WeaponDamage::new(d.min, d.max)),
            dropable: self.dropable,
            sellable: self.sellable,
            actionable: self.actionable,
            upgradeable: self.upgradeable,
            mapdrop: self.mapdrop,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawSetStage {
    count: usize,
    #[serde(default)]
    bonus: RawBonus,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSet {
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    stages: Vec<RawSetStage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawCatalog {
    items: Vec<RawItem>,
    sets: Vec<RawSet>,
}

/// Base items and set definitions known to the game
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: AHashMap<ItemId, ItemModel>,
    sets: Arc<ItemSetList>,
}

impl Catalog {
    pub fn new(items: Vec<ItemModel>, sets: ItemSetList) -> Self {
        Self {
            items: items.into_iter().map(|i| (i.id, i)).collect(),
            sets: Arc::new(sets),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(content)?;

        let mut items = Vec::with_capacity(raw.items.len());
        for item in raw.items {
            items.push(item.into_item()?);
        }

        let mut sets = ItemSetList::new();
        for raw_set in raw.sets {
            let mut set = ItemSet::new(raw_set.key.as_str(), &raw_set.name);
            for stage in raw_set.stages {
                set = set.with_stage(stage.count, stage.bonus.into_bonus()?);
            }
            sets.insert(set);
        }

        tracing::debug!(
            items = items.len(),
            sets = sets.len(),
            "Loaded item catalog"
        );
        Ok(Self::new(items, sets))
    }

    pub fn sets(&self) -> Arc<ItemSetList> {
        Arc::clone(&self.sets)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every base item, ordered by id
    pub fn all_items(&self) -> ItemModelList {
        let mut items: Vec<ItemModel> = self.items.values().cloned().collect();
        items.sort_by_key(|i| i.id);
        ItemModelList::new(items)
    }

    /// Item for `id`; upgraded ids are synthesized from their base item
    pub fn resolve(&self, id: ItemId) -> Result<ItemModel> {
        if let Some(item) = self.items.get(&id) {
            return Ok(item.clone());
        }
        let base = self
            .items
            .get(&id.base())
            .ok_or(SimError::UnknownItem(id))?;
        base.upgraded(id.upgrade_tier().min(u8::MAX as u64) as u8)
    }
}

/// Read a catalog from a JSON file
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    Catalog::from_json_str(&content)
}

/// Candidate items for a search
#[derive(Debug, Clone, Default)]
pub struct ItemModelList {
    items: Vec<Arc<ItemModel>>,
}

impl ItemModelList {
    pub fn new(items: Vec<ItemModel>) -> Self {
        Self {
            items: items.into_iter().map(Arc::new).collect(),
        }
    }

    /// Resolve an inventory of item ids against the catalog, duplicates dropped
    pub fn from_inventory(catalog: &Catalog, ids: &[ItemId]) -> Result<Self> {
        let mut seen = AHashSet::new();
        let mut items = Vec::new();
        for id in ids {
            if seen.insert(*id) {
                items.push(catalog.resolve(*id)?);
            }
        }
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ItemModel>> {
        self.items.iter()
    }

    /// Items worn in `slot`, in list order
    pub fn for_slot(&self, slot: Slot) -> Vec<Arc<ItemModel>> {
        self.items
            .iter()
            .filter(|i| i.slot() == Some(slot))
            .cloned()
            .collect()
    }

    fn filtered(&self, keep: impl Fn(&ItemModel) -> bool) -> Self {
        Self {
            items: self.items.iter().filter(|i| keep(i)).cloned().collect(),
        }
    }

    /// Drop items the player is too low level to wear
    pub fn filter_by_player_level(&self, player_level: u32) -> Self {
        self.filtered(|i| i.level <= player_level)
    }

    /// Drop products that only drop on the world map
    pub fn filter_mapdrop_items(&self) -> Self {
        self.filtered(|i| !(i.mapdrop && i.item_type == ItemType::Yield))
    }

    /// Drop consumables and recipes
    pub fn filter_out_usables(&self) -> Self {
        self.filtered(|i| !i.item_type.is_usable())
    }

    /// Keep only the listed ids
    pub fn filter_by_item_id_list(&self, ids: &[ItemId]) -> Self {
        let wanted: AHashSet<ItemId> = ids.iter().copied().collect();
        self.filtered(|i| wanted.contains(&i.id))
    }
}

impl FromIterator<ItemModel> for ItemModelList {
    fn from_iter<I: IntoIterator<Item = ItemModel>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Attribute, Skill};

    const CATALOG: &str = r#"{
        "items": [
            {"item_id": 41000, "name": "Colt", "type": "right_arm", "level": 10,
             "damage": {"min": 10, "max": 20}, "upgradeable": true, "set": "set_gunman",
             "bonus": {"skills": {"shot": 5}, "attributes": {"dexterity": 1}}},
            {"item_id": 52000, "name": "Hat", "type": "head", "level": 30,
             "bonus": {"workpoints": 0.5, "level_scaled": ["work"]}},
            {"item_id": 700000, "name": "Gold nugget", "type": "yield", "mapdrop": true},
            {"item_id": 800000, "name": "Potion", "type": "usable"}
        ],
        "sets": [
            {"key": "set_gunman", "name": "Gunman", "stages": [
                {"count": 2, "bonus": {"item_drop": 0.05}}
            ]}
        ]
    }"#;

    fn catalog() -> Catalog {
        Catalog::from_json_str(CATALOG).unwrap()
    }

    #[test]
    fn test_load_catalog_json() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 4);
        let colt = catalog.resolve(ItemId(41000)).unwrap();
        assert_eq!(colt.slot(), Some(Slot::Weapon));
        assert_eq!(colt.bonus.skills.skill(Skill::Shot), 5.0);
        assert_eq!(colt.bonus.skills.attribute(Attribute::Dexterity), 1.0);
        assert_eq!(colt.set, Some(SetId::from("set_gunman")));

        let hat = catalog.resolve(ItemId(52000)).unwrap();
        assert!(hat.bonus.updates.work_updates);

        let sets = catalog.sets();
        assert!(sets.active_stage(&SetId::from("set_gunman"), 2).is_some());
    }

    #[test]
    fn test_resolve_synthesizes_upgrades() {
        let colt3 = catalog().resolve(ItemId(41003)).unwrap();
        assert_eq!(colt3.id, ItemId(41003));
        assert!((colt3.damage_range.unwrap().max - 26.0).abs() < 1e-9);
        assert!(matches!(
            catalog().resolve(ItemId(99000)),
            Err(SimError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_unknown_skill_is_load_error() {
        let bad = r#"{"items": [{"item_id": 1000, "name": "X", "type": "belt",
                       "bonus": {"skills": {"juggling": 2}}}]}"#;
        assert!(matches!(
            Catalog::from_json_str(bad),
            Err(SimError::UnknownSkill(_))
        ));
    }

    #[test]
    fn test_filters() {
        let catalog = catalog();
        let ids = [ItemId(41000), ItemId(52000), ItemId(700000), ItemId(800000)];
        let list = ItemModelList::from_inventory(&catalog, &ids).unwrap();
        assert_eq!(list.len(), 4);

        assert_eq!(list.filter_by_player_level(20).len(), 3);
        assert_eq!(list.filter_mapdrop_items().len(), 3);
        assert_eq!(list.filter_out_usables().len(), 3);
        assert_eq!(
            list.filter_by_item_id_list(&[ItemId(52000), ItemId(1)]).len(),
            1
        );

        let narrowed = list
            .filter_by_player_level(50)
            .filter_mapdrop_items()
            .filter_out_usables();
        assert_eq!(narrowed.len(), 2);
        assert_eq!(narrowed.for_slot(Slot::Weapon).len(), 1);
        assert!(narrowed.for_slot(Slot::Product).is_empty());
    }

    #[test]
    fn test_inventory_dedups() {
        let list =
            ItemModelList::from_inventory(&catalog(), &[ItemId(41000), ItemId(41000)]).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_all_items_sorted() {
        let all = catalog().all_items();
        let ids: Vec<u64> = all.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![41000, 52000, 700000, 800000]);
    }
}
