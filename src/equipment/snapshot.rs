//! Immutable stat snapshot of one equipment assignment

use serde::Serialize;

use super::permutations::Permutation;
use crate::stats::{Skills, WeaponDamage};

/// Aggregated stats of one permutation. This is what fitness rules score.
///
/// Everything is owned; items are shared through `Arc` but never mutated, so
/// two snapshots never observe each other's changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EquipmentPermutationData {
    pub item_drop: f64,
    pub product_drop: f64,
    pub exp_bonus: f64,
    pub workpoints: f64,
    pub regeneration: f64,
    pub speed: f64,
    pub weapon_damage: WeaponDamage,
    pub skills: Skills,
    pub permutation: Permutation,
}
