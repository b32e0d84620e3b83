//! Bonus block shared by items and set stages

use serde::{Deserialize, Serialize};

use super::update_table::{level_value, UpdateTable};
use crate::stats::Skills;

/// Raw bonus values of one item or one set stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemBonus {
    pub skills: Skills,
    pub item_drop: f64,
    pub product_drop: f64,
    pub workpoints: f64,
    pub regeneration: f64,
    pub damage: f64,
    pub speed: f64,
    pub exp_bonus: f64,
    pub updates: UpdateTable,
}

/// Bonus values after level scaling has been applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBonus {
    pub skills: Skills,
    pub item_drop: f64,
    pub product_drop: f64,
    pub workpoints: f64,
    pub regeneration: f64,
    pub damage: f64,
    pub speed: f64,
    pub exp_bonus: f64,
}

impl ItemBonus {
    /// Apply the update table against `player_level`
    pub fn resolve(&self, player_level: u32) -> ResolvedBonus {
        let u = &self.updates;
        ResolvedBonus {
            skills: if u.skills_updates {
                self.skills.scaled_by_level(player_level)
            } else {
                self.skills
            },
            item_drop: level_value(self.item_drop, u.item_drop_updates, player_level),
            product_drop: level_value(self.product_drop, u.product_drop_updates, player_level),
            workpoints: level_value(self.workpoints, u.work_updates, player_level),
            regeneration: level_value(self.regeneration, u.regen_updates, player_level),
            damage: level_value(self.damage, u.damage_updates, player_level),
            speed: level_value(self.speed, u.speed_updates, player_level),
            exp_bonus: level_value(self.exp_bonus, u.exp_bonus_updates, player_level),
        }
    }

    /// Multiply every value by `factor`; skills and work points are rounded
    pub fn upgraded(&self, factor: f64) -> Self {
        Self {
            skills: (self.skills * factor).map(f64::round),
            item_drop: self.item_drop * factor,
            product_drop: self.product_drop * factor,
            workpoints: (self.workpoints * factor).round(),
            regeneration: self.regeneration * factor,
            damage: self.damage * factor,
            speed: self.speed * factor,
            exp_bonus: self.exp_bonus * factor,
            updates: self.updates,
        }
    }
}

impl std::ops::AddAssign<&ResolvedBonus> for ResolvedBonus {
    fn add_assign(&mut self, rhs: &ResolvedBonus) {
        self.skills += rhs.skills;
        self.item_drop += rhs.item_drop;
        self.product_drop += rhs.product_drop;
        self.workpoints += rhs.workpoints;
        self.regeneration += rhs.regeneration;
        self.damage += rhs.damage;
        self.speed += rhs.speed;
        self.exp_bonus += rhs.exp_bonus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Skill;

    #[test]
    fn test_resolve_scales_only_flagged_stats() {
        let bonus = ItemBonus {
            workpoints: 0.5,
            regeneration: 0.5,
            updates: UpdateTable {
                work_updates: true,
                ..UpdateTable::none()
            },
            ..Default::default()
        };
        let resolved = bonus.resolve(9);
        assert_eq!(resolved.workpoints, 5.0);
        assert_eq!(resolved.regeneration, 0.5);
    }

    #[test]
    fn test_resolve_skills_scaling() {
        let bonus = ItemBonus {
            skills: Skills::new().with_skill(Skill::Build, 0.2),
            updates: UpdateTable {
                skills_updates: true,
                ..UpdateTable::none()
            },
            ..Default::default()
        };
        assert_eq!(bonus.resolve(12).skills.skill(Skill::Build), 3.0);
    }

    #[test]
    fn test_upgraded_rounds_skills_and_work() {
        let bonus = ItemBonus {
            skills: Skills::new().with_skill(Skill::Aim, 7.0),
            workpoints: 12.0,
            item_drop: 0.1,
            ..Default::default()
        };
        let up = bonus.upgraded(1.3);
        assert_eq!(up.skills.skill(Skill::Aim), 9.0);
        assert_eq!(up.workpoints, 16.0);
        assert!((up.item_drop - 0.13).abs() < 1e-9);
    }
}
