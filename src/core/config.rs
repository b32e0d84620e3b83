//! Optimizer configuration with documented defaults
//!
//! Loaded from TOML. Every field has a default, so an empty file is a valid
//! config (it just has no fitness rules).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SimError};
use crate::core::types::ItemId;
use crate::fitness::RuleSpec;

/// Which search to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Brute force when the space is small enough, genetic otherwise
    #[default]
    Auto,
    BruteForce,
    Greedy,
    Genetic,
}

/// Candidate filters applied before the search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Skip products that only drop on the world map
    pub exclude_mapdrop: bool,

    /// Skip consumables and recipes
    pub exclude_usables: bool,

    /// When set, only these items are considered
    pub item_ids: Option<Vec<ItemId>>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclude_mapdrop: true,
            exclude_usables: true,
            item_ids: None,
        }
    }
}

/// Genetic algorithm parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Individuals per generation
    ///
    /// Must be at least 2 so tournament selection has a pair to compare.
    pub population_size: usize,

    /// Number of generations to run
    ///
    /// The only bound on GA run time.
    pub generations: usize,

    /// Chance (0-1) that a child gets one slot rerolled
    pub mutation_rate: f64,

    /// Random seed for reproducible runs (None = from entropy)
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 60,
            generations: 120,
            mutation_rate: 0.1,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Character level, drives level-scaled bonuses and the level filter
    pub player_level: u32,

    pub strategy: StrategyKind,

    /// Largest permutation count `Auto` will still brute force
    ///
    /// Each permutation costs one aggregation plus one rule-set evaluation.
    pub brute_force_limit: u64,

    /// Relative tie band for fitness comparison (0 = exact)
    pub tolerance: f64,

    /// Offer "no item" as a candidate in every slot that has items
    pub include_empty_slots: bool,

    pub filters: FilterConfig,

    pub genetic: GeneticConfig,

    /// Fitness rules, highest priority first
    pub rules: Vec<RuleSpec>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            player_level: 1,
            strategy: StrategyKind::Auto,
            brute_force_limit: 200_000,
            tolerance: 0.0,
            include_empty_slots: false,
            filters: FilterConfig::default(),
            genetic: GeneticConfig::default(),
            rules: Vec::new(),
        }
    }
}

impl OptimizerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: OptimizerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.player_level == 0 {
            return Err(SimError::InvalidConfig(
                "player_level must be at least 1".into(),
            ));
        }
        if !(self.tolerance >= 0.0 && self.tolerance.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        if self.genetic.population_size < 2 {
            return Err(SimError::InvalidConfig(
                "genetic.population_size must be at least 2".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.genetic.mutation_rate) {
            return Err(SimError::InvalidConfig(format!(
                "genetic.mutation_rate must be within 0..=1, got {}",
                self.genetic.mutation_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = OptimizerConfig::from_toml_str("").unwrap();
        assert_eq!(config, OptimizerConfig::default());
        assert_eq!(config.strategy, StrategyKind::Auto);
        assert!(config.filters.exclude_mapdrop);
    }

    #[test]
    fn test_full_config() {
        let config = OptimizerConfig::from_toml_str(
            r#"
            player_level = 42
            strategy = "genetic"
            tolerance = 0.05

            [filters]
            exclude_mapdrop = false
            item_ids = [41000, 52003]

            [genetic]
            population_size = 20
            generations = 10
            seed = 7

            [[rules]]
            rule = "workpoints"

            [[rules]]
            rule = "skill"
            name = "trade"
            "#,
        )
        .unwrap();
        assert_eq!(config.player_level, 42);
        assert_eq!(config.strategy, StrategyKind::Genetic);
        assert!(!config.filters.exclude_mapdrop);
        assert!(config.filters.exclude_usables);
        assert_eq!(
            config.filters.item_ids,
            Some(vec![ItemId(41000), ItemId(52003)])
        );
        assert_eq!(config.genetic.seed, Some(7));
        assert_eq!(config.genetic.mutation_rate, 0.1);
        assert_eq!(config.rules.len(), 2);
    }

    #[test]
    fn test_validation() {
        assert!(OptimizerConfig::from_toml_str("player_level = 0").is_err());
        assert!(OptimizerConfig::from_toml_str("tolerance = -0.1").is_err());
        assert!(OptimizerConfig::from_toml_str("[genetic]\nmutation_rate = 1.5").is_err());
        assert!(OptimizerConfig::from_toml_str("[genetic]\npopulation_size = 1").is_err());
    }
}
