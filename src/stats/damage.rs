//! Weapon damage range

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Minimum/maximum damage of a weapon.
///
/// `min <= max` is expected from catalog data but never checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponDamage {
    pub min: f64,
    pub max: f64,
}

impl WeaponDamage {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn average(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl Add for WeaponDamage {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            min: self.min + rhs.min,
            max: self.max + rhs.max,
        }
    }
}

/// Flat damage bonus applies to both ends of the range
impl Add<f64> for WeaponDamage {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        Self {
            min: self.min + rhs,
            max: self.max + rhs,
        }
    }
}

impl Mul<f64> for WeaponDamage {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            min: self.min * rhs,
            max: self.max * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_and_scalar_addition() {
        let d = WeaponDamage::new(10.0, 20.0) + WeaponDamage::new(1.0, 2.0);
        assert_eq!(d, WeaponDamage::new(11.0, 22.0));
        assert_eq!(d + 5.0, WeaponDamage::new(16.0, 27.0));
    }

    #[test]
    fn test_average() {
        assert_eq!(WeaponDamage::new(10.0, 20.0).average(), 15.0);
        assert_eq!(WeaponDamage::default().average(), 0.0);
    }

    #[test]
    fn test_inverted_range_is_not_rejected() {
        let d = WeaponDamage::new(30.0, 10.0);
        assert_eq!(d.average(), 20.0);
    }
}
