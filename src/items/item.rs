//! Item model: one item or one upgrade stage of an item

use serde::{Deserialize, Serialize};

use super::bonus::ItemBonus;
use crate::core::error::{Result, SimError};
use crate::core::types::{ItemId, ItemType, SetId, Slot, MAX_UPGRADE_TIER};
use crate::stats::WeaponDamage;

/// Bonus multiplier gained per upgrade tier
pub const UPGRADE_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemModel {
    pub id: ItemId,
    pub name: String,
    /// Shop price
    pub value: f64,
    pub item_type: ItemType,
    /// Required character level
    pub level: u32,
    pub set: Option<SetId>,
    pub bonus: ItemBonus,
    /// Only weapons carry a damage range
    pub damage_range: Option<WeaponDamage>,
    pub dropable: bool,
    pub sellable: bool,
    pub actionable: bool,
    pub upgradeable: bool,
    /// Product that only drops from the world map
    pub mapdrop: bool,
}

impl ItemModel {
    /// Minimal equippable item, mostly for tests and hand-built catalogs
    pub fn new(id: u64, name: &str, item_type: ItemType) -> Self {
        Self {
            id: ItemId(id),
            name: name.to_string(),
            value: 0.0,
            item_type,
            level: 0,
            set: None,
            bonus: ItemBonus::default(),
            damage_range: None,
            dropable: true,
            sellable: true,
            actionable: false,
            upgradeable: false,
            mapdrop: false,
        }
    }

    pub fn with_bonus(mut self, bonus: ItemBonus) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn with_set(mut self, set: impl Into<SetId>) -> Self {
        self.set = Some(set.into());
        self
    }

    pub fn with_damage(mut self, min: f64, max: f64) -> Self {
        self.damage_range = Some(WeaponDamage::new(min, max));
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn slot(&self) -> Option<Slot> {
        self.item_type.slot()
    }

    pub fn upgrade_tier(&self) -> u8 {
        self.id.upgrade_tier() as u8
    }

    /// Synthesize upgrade stage `tier` (1..=5) from this item.
    ///
    /// Every bonus value, the speed and the damage range are multiplied by
    /// `1 + 0.1 * tier`. Upgrading an already upgraded item starts from the
    /// values it has, so callers should upgrade base items.
    pub fn upgraded(&self, tier: u8) -> Result<ItemModel> {
        if !self.upgradeable || tier == 0 || tier > MAX_UPGRADE_TIER {
            return Err(SimError::InvalidUpgrade { id: self.id, tier });
        }
        let factor = 1.0 + UPGRADE_STEP * tier as f64;
        Ok(ItemModel {
            id: self.id.with_tier(tier),
            name: format!("{} [{}]", self.name, tier),
            bonus: self.bonus.upgraded(factor),
            damage_range: self.damage_range.map(|d| d * factor),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Skill, Skills};

    fn sword() -> ItemModel {
        let mut item = ItemModel::new(41000, "Sword", ItemType::RightArm).with_damage(10.0, 20.0);
        item.upgradeable = true;
        item.bonus.skills = Skills::new().with_skill(Skill::Punch, 10.0);
        item.bonus.speed = 0.2;
        item
    }

    #[test]
    fn test_slot_from_type() {
        assert_eq!(sword().slot(), Some(Slot::Weapon));
        assert_eq!(ItemModel::new(1, "Potion", ItemType::Usable).slot(), None);
    }

    #[test]
    fn test_upgrade_multiplies_bonuses() {
        let up = sword().upgraded(2).unwrap();
        assert_eq!(up.id, ItemId(41002));
        assert_eq!(up.upgrade_tier(), 2);
        assert_eq!(up.bonus.skills.skill(Skill::Punch), 12.0);
        assert!((up.bonus.speed - 0.24).abs() < 1e-9);
        let dmg = up.damage_range.unwrap();
        assert!((dmg.min - 12.0).abs() < 1e-9);
        assert!((dmg.max - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_upgrade_rejects_bad_tiers() {
        assert!(sword().upgraded(0).is_err());
        assert!(sword().upgraded(6).is_err());

        let mut plain = sword();
        plain.upgradeable = false;
        assert!(matches!(
            plain.upgraded(1),
            Err(SimError::InvalidUpgrade { tier: 1, .. })
        ));
    }
}
