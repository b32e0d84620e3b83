//! Ordered set of fitness rules

use super::result::FitnessResult;
use super::rules::{RuleSpec, SimulFitnessRule};
use crate::core::error::{Result, SimError};
use crate::equipment::EquipmentPermutationData;

/// Rules in priority order plus the tie tolerance used when comparing results
#[derive(Default)]
pub struct SimulFitnessRuleSet {
    rules: Vec<Box<dyn SimulFitnessRule>>,
    tolerance: f64,
}

impl SimulFitnessRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `tolerance` is the relative margin within which a component counts as tied
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_rule(mut self, rule: impl SimulFitnessRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn push(&mut self, rule: Box<dyn SimulFitnessRule>) {
        self.rules.push(rule);
    }

    pub fn from_specs(specs: &[RuleSpec], tolerance: f64) -> Result<Self> {
        let mut set = Self::new().with_tolerance(tolerance);
        for spec in specs {
            set.push(spec.build()?);
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Score `data` with every rule in registration order
    pub fn get_fitness_result(&self, data: &EquipmentPermutationData) -> Result<FitnessResult> {
        let mut values = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let value = rule.calculate(data);
            if !value.is_finite() {
                return Err(SimError::NonFiniteFitness {
                    rule: rule.name().to_string(),
                });
            }
            values.push(value);
        }
        Ok(FitnessResult::new(values, self.tolerance))
    }

    /// Zero vector that anything positive beats
    pub fn generate_empty_result(&self) -> FitnessResult {
        FitnessResult::zeros(self.rules.len(), self.tolerance)
    }
}
