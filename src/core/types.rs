//! Core type definitions used throughout the codebase

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Number of equipment slots on a character
pub const SLOT_COUNT: usize = 10;

/// Highest upgrade tier an item can reach
pub const MAX_UPGRADE_TIER: u8 = 5;

/// Item identifier as used by the game.
///
/// The last three decimal digits carry the upgrade tier, so `41000` is the
/// base item and `41003` its third upgrade.
#[derive(
    Debug, Display, From, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn base(&self) -> ItemId {
        ItemId(self.0 - self.0 % 1000)
    }

    pub fn upgrade_tier(&self) -> u64 {
        self.0 % 1000
    }

    pub fn with_tier(&self, tier: u8) -> ItemId {
        ItemId(self.base().0 + tier as u64)
    }
}

/// Key of an item set (e.g. `set_farmer`)
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetId(pub String);

impl From<&str> for SetId {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Equipment slot on the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Weapon,
    Headgear,
    Clothes,
    Pants,
    Boots,
    Belt,
    Necklace,
    FortWeapon,
    Animal,
    Product,
}

impl Slot {
    /// All slots in permutation order
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot::Weapon,
        Slot::Headgear,
        Slot::Clothes,
        Slot::Pants,
        Slot::Boots,
        Slot::Belt,
        Slot::Necklace,
        Slot::FortWeapon,
        Slot::Animal,
        Slot::Product,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Weapon => "weapon",
            Slot::Headgear => "headgear",
            Slot::Clothes => "clothes",
            Slot::Pants => "pants",
            Slot::Boots => "boots",
            Slot::Belt => "belt",
            Slot::Necklace => "necklace",
            Slot::FortWeapon => "fort_weapon",
            Slot::Animal => "animal",
            Slot::Product => "product",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Item type as reported by the game catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "right_arm")]
    RightArm,
    #[serde(rename = "head")]
    Head,
    #[serde(rename = "body")]
    Body,
    #[serde(rename = "pants")]
    Pants,
    #[serde(rename = "foot")]
    Foot,
    #[serde(rename = "belt")]
    Belt,
    #[serde(rename = "neck")]
    Neck,
    #[serde(rename = "left_arm")]
    LeftArm,
    #[serde(rename = "animal")]
    Animal,
    #[serde(rename = "yield")]
    Yield,
    #[serde(rename = "usable")]
    Usable,
    #[serde(rename = "recipe")]
    Recipe,
}

impl ItemType {
    /// Slot this item type is worn in, `None` for items that can't be equipped
    pub fn slot(&self) -> Option<Slot> {
        match self {
            ItemType::RightArm => Some(Slot::Weapon),
            ItemType::Head => Some(Slot::Headgear),
            ItemType::Body => Some(Slot::Clothes),
            ItemType::Pants => Some(Slot::Pants),
            ItemType::Foot => Some(Slot::Boots),
            ItemType::Belt => Some(Slot::Belt),
            ItemType::Neck => Some(Slot::Necklace),
            ItemType::LeftArm => Some(Slot::FortWeapon),
            ItemType::Animal => Some(Slot::Animal),
            ItemType::Yield => Some(Slot::Product),
            ItemType::Usable | ItemType::Recipe => None,
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, ItemType::Usable | ItemType::Recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_tier_encoding() {
        let id = ItemId(41003);
        assert_eq!(id.base(), ItemId(41000));
        assert_eq!(id.upgrade_tier(), 3);
        assert_eq!(id.with_tier(5), ItemId(41005));
        assert_eq!(ItemId(41000).upgrade_tier(), 0);
    }

    #[test]
    fn test_slot_indices_follow_all_order() {
        for (i, slot) in Slot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_item_type_slots() {
        assert_eq!(ItemType::RightArm.slot(), Some(Slot::Weapon));
        assert_eq!(ItemType::LeftArm.slot(), Some(Slot::FortWeapon));
        assert_eq!(ItemType::Yield.slot(), Some(Slot::Product));
        assert_eq!(ItemType::Usable.slot(), None);
        assert!(ItemType::Recipe.is_usable());
    }
}
