//! Level-scaling flags of an item or set bonus

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Which base stats grow with the player's level.
///
/// A flagged stat contributes `ceil(base * level)`, an unflagged one its base
/// value. The table never changes after the item is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTable {
    pub skills_updates: bool,
    pub work_updates: bool,
    pub regen_updates: bool,
    pub speed_updates: bool,
    pub item_drop_updates: bool,
    pub product_drop_updates: bool,
    pub exp_bonus_updates: bool,
    pub damage_updates: bool,
}

impl UpdateTable {
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from catalog flag names (`skills`, `work`, `regen`, `speed`,
    /// `item_drop`, `product_drop`, `exp_bonus`, `damage`)
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut table = Self::none();
        for name in names {
            match name.as_ref() {
                "skills" => table.skills_updates = true,
                "work" => table.work_updates = true,
                "regen" => table.regen_updates = true,
                "speed" => table.speed_updates = true,
                "item_drop" => table.item_drop_updates = true,
                "product_drop" => table.product_drop_updates = true,
                "exp_bonus" => table.exp_bonus_updates = true,
                "damage" => table.damage_updates = true,
                other => {
                    return Err(SimError::InvalidConfig(format!(
                        "unknown level-scaled stat '{}'",
                        other
                    )))
                }
            }
        }
        Ok(table)
    }
}

/// `ceil(base * level)` when `scaled`, otherwise `base`
pub fn level_value(base: f64, scaled: bool, level: u32) -> f64 {
    if scaled {
        (base * level as f64).ceil()
    } else {
        base
    }
}
