//! Character attributes and skills
//!
//! Every skill belongs to exactly one attribute. The attribute value is added
//! on top of each of its five skills when the effective skill is computed, so
//! one point of strength counts as one point in build, punch, tough,
//! endurance and health.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

use crate::core::error::SimError;

pub const ATTRIBUTE_COUNT: usize = 4;
pub const SKILLS_PER_ATTRIBUTE: usize = 5;
pub const SKILL_COUNT: usize = ATTRIBUTE_COUNT * SKILLS_PER_ATTRIBUTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Mobility,
    Dexterity,
    Charisma,
}

impl Attribute {
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::Strength,
        Attribute::Mobility,
        Attribute::Dexterity,
        Attribute::Charisma,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Strength => "strength",
            Attribute::Mobility => "mobility",
            Attribute::Dexterity => "dexterity",
            Attribute::Charisma => "charisma",
        }
    }

    /// The five skills driven by this attribute
    pub fn skills(&self) -> [Skill; SKILLS_PER_ATTRIBUTE] {
        let start = self.index() * SKILLS_PER_ATTRIBUTE;
        let mut out = [Skill::Build; SKILLS_PER_ATTRIBUTE];
        for (offset, slot) in out.iter_mut().enumerate() {
            *slot = Skill::ALL[start + offset];
        }
        out
    }
}

impl FromStr for Attribute {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| SimError::UnknownSkill(s.to_string()))
    }
}

/// Skills ordered by attribute, five per attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    // Strength
    Build,
    Punch,
    Tough,
    Endurance,
    Health,
    // Mobility
    Ride,
    Reflex,
    Dodge,
    Hide,
    Swim,
    // Dexterity
    Aim,
    Shot,
    Pitfall,
    FingerDexterity,
    Repair,
    // Charisma
    Leadership,
    Tactic,
    Trade,
    Animal,
    Appearance,
}

impl Skill {
    pub const ALL: [Skill; SKILL_COUNT] = [
        Skill::Build,
        Skill::Punch,
        Skill::Tough,
        Skill::Endurance,
        Skill::Health,
        Skill::Ride,
        Skill::Reflex,
        Skill::Dodge,
        Skill::Hide,
        Skill::Swim,
        Skill::Aim,
        Skill::Shot,
        Skill::Pitfall,
        Skill::FingerDexterity,
        Skill::Repair,
        Skill::Leadership,
        Skill::Tactic,
        Skill::Trade,
        Skill::Animal,
        Skill::Appearance,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn attribute(&self) -> Attribute {
        Attribute::ALL[self.index() / SKILLS_PER_ATTRIBUTE]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Build => "build",
            Skill::Punch => "punch",
            Skill::Tough => "tough",
            Skill::Endurance => "endurance",
            Skill::Health => "health",
            Skill::Ride => "ride",
            Skill::Reflex => "reflex",
            Skill::Dodge => "dodge",
            Skill::Hide => "hide",
            Skill::Swim => "swim",
            Skill::Aim => "aim",
            Skill::Shot => "shot",
            Skill::Pitfall => "pitfall",
            Skill::FingerDexterity => "finger_dexterity",
            Skill::Repair => "repair",
            Skill::Leadership => "leadership",
            Skill::Tactic => "tactic",
            Skill::Trade => "trade",
            Skill::Animal => "animal",
            Skill::Appearance => "appearance",
        }
    }
}

impl FromStr for Skill {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::ALL
            .iter()
            .copied()
            .find(|skill| skill.name() == s)
            .ok_or_else(|| SimError::UnknownSkill(s.to_string()))
    }
}

/// Attribute and skill values of a character or of one item's bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    attributes: [f64; ATTRIBUTE_COUNT],
    skills: [f64; SKILL_COUNT],
}

impl Default for Skills {
    fn default() -> Self {
        Self::new()
    }
}

impl Skills {
    pub fn new() -> Self {
        Self {
            attributes: [0.0; ATTRIBUTE_COUNT],
            skills: [0.0; SKILL_COUNT],
        }
    }

    /// Build from `(name, value)` pairs where a name is either an attribute or a skill
    pub fn from_named<'a, I>(values: I) -> Result<Self, SimError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut out = Self::new();
        for (name, value) in values {
            if let Ok(attribute) = name.parse::<Attribute>() {
                out.attributes[attribute.index()] += value;
            } else {
                let skill: Skill = name.parse()?;
                out.skills[skill.index()] += value;
            }
        }
        Ok(out)
    }

    pub fn with_attribute(mut self, attribute: Attribute, value: f64) -> Self {
        self.attributes[attribute.index()] = value;
        self
    }

    pub fn with_skill(mut self, skill: Skill, value: f64) -> Self {
        self.skills[skill.index()] = value;
        self
    }

    pub fn attribute(&self, attribute: Attribute) -> f64 {
        self.attributes[attribute.index()]
    }

    /// Base skill value, without the attribute contribution
    pub fn skill(&self, skill: Skill) -> f64 {
        self.skills[skill.index()]
    }

    pub fn set_attribute(&mut self, attribute: Attribute, value: f64) {
        self.attributes[attribute.index()] = value;
    }

    pub fn set_skill(&mut self, skill: Skill, value: f64) {
        self.skills[skill.index()] = value;
    }

    /// Skill value including its parent attribute
    pub fn effective(&self, skill: Skill) -> f64 {
        self.skill(skill) + self.attribute(skill.attribute())
    }

    /// Effective values of all twenty skills, in `Skill::ALL` order
    pub fn effective_skills(&self) -> [f64; SKILL_COUNT] {
        let mut out = self.skills;
        for (i, value) in out.iter_mut().enumerate() {
            *value += self.attributes[i / SKILLS_PER_ATTRIBUTE];
        }
        out
    }

    pub fn is_zero(&self) -> bool {
        self.attributes.iter().chain(self.skills.iter()).all(|v| *v == 0.0)
    }

    /// Level scaling: every component becomes `ceil(v * level)`
    pub fn scaled_by_level(&self, level: u32) -> Self {
        let level = level as f64;
        self.map(|v| (v * level).ceil())
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        let mut out = *self;
        out.attributes.iter_mut().for_each(|v| *v = f(*v));
        out.skills.iter_mut().for_each(|v| *v = f(*v));
        out
    }
}

impl Add for Skills {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for Skills {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.attributes.iter_mut().zip(rhs.attributes.iter()) {
            *a += b;
        }
        for (a, b) in self.skills.iter_mut().zip(rhs.skills.iter()) {
            *a += b;
        }
    }
}

impl Mul<f64> for Skills {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

impl std::iter::Sum for Skills {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Skills::new(), |acc, s| acc + s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_attribute_grouping() {
        assert_eq!(Skill::Build.attribute(), Attribute::Strength);
        assert_eq!(Skill::Health.attribute(), Attribute::Strength);
        assert_eq!(Skill::Ride.attribute(), Attribute::Mobility);
        assert_eq!(Skill::Repair.attribute(), Attribute::Dexterity);
        assert_eq!(Skill::Appearance.attribute(), Attribute::Charisma);
    }

    #[test]
    fn test_attribute_skills_listing() {
        assert_eq!(
            Attribute::Mobility.skills(),
            [Skill::Ride, Skill::Reflex, Skill::Dodge, Skill::Hide, Skill::Swim]
        );
    }

    #[test]
    fn test_effective_adds_parent_attribute() {
        let s = Skills::new()
            .with_attribute(Attribute::Strength, 3.0)
            .with_skill(Skill::Build, 2.0);
        assert_eq!(s.effective(Skill::Build), 5.0);
        assert_eq!(s.effective(Skill::Punch), 3.0);
        assert_eq!(s.effective(Skill::Ride), 0.0);

        let all = s.effective_skills();
        assert_eq!(all[Skill::Build.index()], 5.0);
        assert_eq!(all[Skill::Health.index()], 3.0);
        assert_eq!(all[Skill::Aim.index()], 0.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Skills::new().with_skill(Skill::Aim, 1.0);
        let b = Skills::new()
            .with_skill(Skill::Aim, 2.0)
            .with_attribute(Attribute::Charisma, 4.0);
        let sum = a + b;
        assert_eq!(sum.skill(Skill::Aim), 3.0);
        assert_eq!(sum.attribute(Attribute::Charisma), 4.0);
        assert_eq!(a + b, b + a);

        let doubled = b * 2.0;
        assert_eq!(doubled.skill(Skill::Aim), 4.0);
        assert_eq!(doubled.attribute(Attribute::Charisma), 8.0);

        let total: Skills = vec![a, b, a].into_iter().sum();
        assert_eq!(total.skill(Skill::Aim), 4.0);
    }

    #[test]
    fn test_level_scaling_rounds_up() {
        let s = Skills::new().with_skill(Skill::Trade, 0.25);
        assert_eq!(s.scaled_by_level(10).skill(Skill::Trade), 3.0);
        assert_eq!(s.scaled_by_level(4).skill(Skill::Trade), 1.0);
    }

    #[test]
    fn test_from_named() {
        let s = Skills::from_named([("strength", 1.0), ("finger_dexterity", 2.0)]).unwrap();
        assert_eq!(s.attribute(Attribute::Strength), 1.0);
        assert_eq!(s.skill(Skill::FingerDexterity), 2.0);

        let err = Skills::from_named([("juggling", 1.0)]).unwrap_err();
        assert!(matches!(err, SimError::UnknownSkill(name) if name == "juggling"));
    }
}
