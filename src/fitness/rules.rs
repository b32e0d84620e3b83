//! Fitness rules: pure scoring functions over one equipment snapshot

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::error::{Result, SimError};
use crate::equipment::EquipmentPermutationData;
use crate::stats::{Attribute, Skill};

/// Scores one snapshot. Implementations must not have side effects.
pub trait SimulFitnessRule: Send + Sync {
    fn name(&self) -> &str;

    fn calculate(&self, data: &EquipmentPermutationData) -> f64;
}

macro_rules! field_rule {
    ($(#[$doc:meta])* $rule:ident, $name:literal, $field:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $rule;

        impl SimulFitnessRule for $rule {
            fn name(&self) -> &str {
                $name
            }

            fn calculate(&self, data: &EquipmentPermutationData) -> f64 {
                data.$field
            }
        }
    };
}

field_rule!(
    /// Item drop chance bonus
    ItemDropSimulRule,
    "item_drop",
    item_drop
);
field_rule!(ProductDropSimulRule, "product_drop", product_drop);
field_rule!(WorkpointsSimulRule, "workpoints", workpoints);
field_rule!(RegenerationSimulRule, "regeneration", regeneration);
field_rule!(ExpBonusSimulRule, "exp_bonus", exp_bonus);
field_rule!(SpeedSimulRule, "speed", speed);

/// Average weapon damage including flat bonuses
#[derive(Debug, Clone, Copy, Default)]
pub struct WeaponDamageSimulRule;

impl SimulFitnessRule for WeaponDamageSimulRule {
    fn name(&self) -> &str {
        "weapon_damage"
    }

    fn calculate(&self, data: &EquipmentPermutationData) -> f64 {
        data.weapon_damage.average()
    }
}

/// One effective skill (skill plus its attribute)
#[derive(Debug, Clone)]
pub struct SkillSimulRule {
    skill: Skill,
}

impl SkillSimulRule {
    pub fn new(skill: Skill) -> Self {
        Self { skill }
    }
}

impl SimulFitnessRule for SkillSimulRule {
    fn name(&self) -> &str {
        self.skill.name()
    }

    fn calculate(&self, data: &EquipmentPermutationData) -> f64 {
        data.skills.effective(self.skill)
    }
}

#[derive(Debug, Clone)]
pub struct AttributeSimulRule {
    attribute: Attribute,
}

impl AttributeSimulRule {
    pub fn new(attribute: Attribute) -> Self {
        Self { attribute }
    }
}

impl SimulFitnessRule for AttributeSimulRule {
    fn name(&self) -> &str {
        self.attribute.name()
    }

    fn calculate(&self, data: &EquipmentPermutationData) -> f64 {
        data.skills.attribute(self.attribute)
    }
}

/// Job points: weighted sum of effective skills, optionally plus work points.
///
/// A job lists the skills it depends on with a multiplier each (usually 1 or 2).
#[derive(Debug, Clone)]
pub struct JobSkillSimulRule {
    name: String,
    weights: Vec<(Skill, f64)>,
    include_workpoints: bool,
}

impl JobSkillSimulRule {
    pub fn new(name: &str, weights: Vec<(Skill, f64)>) -> Self {
        Self {
            name: name.to_string(),
            weights,
            include_workpoints: true,
        }
    }

    pub fn without_workpoints(mut self) -> Self {
        self.include_workpoints = false;
        self
    }
}

impl SimulFitnessRule for JobSkillSimulRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn calculate(&self, data: &EquipmentPermutationData) -> f64 {
        let skills: f64 = self
            .weights
            .iter()
            .map(|(skill, weight)| data.skills.effective(*skill) * weight)
            .sum();
        if self.include_workpoints {
            skills + data.workpoints
        } else {
            skills
        }
    }
}

/// Linear combination of other rules
pub struct WeightedSumSimulRule {
    name: String,
    terms: Vec<(Box<dyn SimulFitnessRule>, f64)>,
}

impl WeightedSumSimulRule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            terms: Vec::new(),
        }
    }

    pub fn with_term(mut self, rule: Box<dyn SimulFitnessRule>, weight: f64) -> Self {
        self.terms.push((rule, weight));
        self
    }
}

impl SimulFitnessRule for WeightedSumSimulRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn calculate(&self, data: &EquipmentPermutationData) -> f64 {
        self.terms
            .iter()
            .map(|(rule, weight)| rule.calculate(data) * weight)
            .sum()
    }
}

/// Rule description as written in the optimizer config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleSpec {
    ItemDrop,
    ProductDrop,
    Workpoints,
    Regeneration,
    ExpBonus,
    Speed,
    WeaponDamage,
    Skill {
        name: String,
    },
    Attribute {
        name: String,
    },
    Job {
        name: String,
        skills: BTreeMap<String, f64>,
        #[serde(default = "default_include_workpoints")]
        include_workpoints: bool,
    },
    WeightedSum {
        name: String,
        terms: Vec<WeightedTerm>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub weight: f64,
    #[serde(flatten)]
    pub rule: RuleSpec,
}

fn default_include_workpoints() -> bool {
    true
}

impl RuleSpec {
    pub fn build(&self) -> Result<Box<dyn SimulFitnessRule>> {
        let rule: Box<dyn SimulFitnessRule> = match self {
            RuleSpec::ItemDrop => Box::new(ItemDropSimulRule),
            RuleSpec::ProductDrop => Box::new(ProductDropSimulRule),
            RuleSpec::Workpoints => Box::new(WorkpointsSimulRule),
            RuleSpec::Regeneration => Box::new(RegenerationSimulRule),
            RuleSpec::ExpBonus => Box::new(ExpBonusSimulRule),
            RuleSpec::Speed => Box::new(SpeedSimulRule),
            RuleSpec::WeaponDamage => Box::new(WeaponDamageSimulRule),
            RuleSpec::Skill { name } => Box::new(SkillSimulRule::new(name.parse()?)),
            RuleSpec::Attribute { name } => Box::new(AttributeSimulRule::new(name.parse()?)),
            RuleSpec::Job {
                name,
                skills,
                include_workpoints,
            } => {
                let mut weights = skills
                    .iter()
                    .map(|(skill, weight)| Ok((skill.parse::<Skill>()?, *weight)))
                    .collect::<Result<Vec<_>>>()?;
                weights.sort_by_key(|(skill, _)| skill.index());
                let rule = JobSkillSimulRule::new(name, weights);
                if *include_workpoints {
                    Box::new(rule)
                } else {
                    Box::new(rule.without_workpoints())
                }
            }
            RuleSpec::WeightedSum { name, terms } => {
                if terms.is_empty() {
                    return Err(SimError::InvalidConfig(format!(
                        "weighted rule '{}' has no terms",
                        name
                    )));
                }
                let mut rule = WeightedSumSimulRule::new(name);
                for term in terms {
                    rule = rule.with_term(term.rule.build()?, term.weight);
                }
                Box::new(rule)
            }
        };
        Ok(rule)
    }
}
