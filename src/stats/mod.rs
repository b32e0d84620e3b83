//! Stat model: attributes, skills and weapon damage

pub mod damage;
pub mod skills;

pub use damage::WeaponDamage;
pub use skills::{Attribute, Skill, Skills, ATTRIBUTE_COUNT, SKILL_COUNT};
