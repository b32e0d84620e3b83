//! Fitness scoring
//!
//! Rules turn one equipment snapshot into a number each; a rule set packs
//! those numbers into a `FitnessResult` whose ordering drives every search.

pub mod result;
pub mod rule_set;
pub mod rules;

pub use result::FitnessResult;
pub use rule_set::SimulFitnessRuleSet;
pub use rules::{
    AttributeSimulRule, ExpBonusSimulRule, ItemDropSimulRule, JobSkillSimulRule,
    ProductDropSimulRule, RegenerationSimulRule, RuleSpec, SimulFitnessRule, SkillSimulRule,
    SpeedSimulRule, WeaponDamageSimulRule, WeightedSumSimulRule, WeightedTerm,
    WorkpointsSimulRule,
};
