//! Equipment search strategies
//!
//! All strategies work on a caller-owned scratch `EquipmentSimul` that they
//! mutate freely; never share one aggregate between two searches.

pub mod brute_force;
pub mod genetic;
pub mod greedy;

pub use brute_force::{maximum_equipment_value_brute_force, BruteForce};
pub use genetic::GeneticAlgorithm;
pub use greedy::{maximum_equipment_greedy, Greedy};

use serde::Serialize;
use std::sync::Arc;

use crate::core::config::{OptimizerConfig, StrategyKind};
use crate::core::error::Result;
use crate::equipment::{CandidateLists, EquipmentPermutationData, EquipmentSimul};
use crate::fitness::{FitnessResult, SimulFitnessRuleSet};
use crate::items::{ItemModelList, ItemSetList};

/// Best equipment found together with its fitness
#[derive(Debug, Clone, Serialize)]
pub struct ScoredEquipment {
    pub data: EquipmentPermutationData,
    pub fitness: FitnessResult,
}

pub trait EquipmentSearch {
    fn name(&self) -> &'static str;

    fn search(
        &mut self,
        equipment: &mut EquipmentSimul,
        candidates: &CandidateLists,
        rules: &SimulFitnessRuleSet,
    ) -> Result<ScoredEquipment>;
}

/// Outcome of `optimize`
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// Strategy that actually ran (never `Auto`)
    pub strategy: StrategyKind,
    pub candidates: usize,
    pub permutations: u128,
    pub rules: Vec<String>,
    pub best: ScoredEquipment,
}

/// Apply the configured filters, in id → level → mapdrop → usables order
pub fn filter_candidates(items: &ItemModelList, config: &OptimizerConfig) -> ItemModelList {
    let mut filtered = match &config.filters.item_ids {
        Some(ids) => items.filter_by_item_id_list(ids),
        None => items.clone(),
    };
    filtered = filtered.filter_by_player_level(config.player_level);
    if config.filters.exclude_mapdrop {
        filtered = filtered.filter_mapdrop_items();
    }
    if config.filters.exclude_usables {
        filtered = filtered.filter_out_usables();
    }
    filtered
}

/// Pick the strategy to run for a candidate space of `permutations`
pub fn resolve_strategy(config: &OptimizerConfig, permutations: u128) -> StrategyKind {
    match config.strategy {
        StrategyKind::Auto if permutations <= config.brute_force_limit as u128 => {
            StrategyKind::BruteForce
        }
        StrategyKind::Auto => StrategyKind::Genetic,
        other => other,
    }
}

/// Filter `items`, build the rule set from the config and run the chosen search
pub fn optimize(
    config: &OptimizerConfig,
    items: &ItemModelList,
    sets: Arc<ItemSetList>,
) -> Result<SearchReport> {
    config.validate()?;
    let rules = SimulFitnessRuleSet::from_specs(&config.rules, config.tolerance)?;
    if rules.is_empty() {
        tracing::warn!("No fitness rules configured, every equipment scores the same");
    }

    let filtered = filter_candidates(items, config);
    let candidates = CandidateLists::from_items(&filtered, config.include_empty_slots);
    let permutations = candidates.calc_permutations();
    if filtered.is_empty() {
        tracing::warn!("No candidate items left after filtering");
    }

    let strategy = resolve_strategy(config, permutations);
    if strategy == StrategyKind::BruteForce && permutations > config.brute_force_limit as u128 {
        tracing::warn!(
            permutations = %permutations,
            limit = config.brute_force_limit,
            "Brute force requested above the configured limit"
        );
    }

    let mut search: Box<dyn EquipmentSearch> = match strategy {
        StrategyKind::BruteForce | StrategyKind::Auto => Box::new(BruteForce),
        StrategyKind::Greedy => Box::new(Greedy),
        StrategyKind::Genetic => Box::new(GeneticAlgorithm::new(config.genetic.clone())),
    };
    tracing::info!(
        strategy = search.name(),
        candidates = filtered.len(),
        permutations = %permutations,
        "Searching equipment"
    );

    let mut equipment = EquipmentSimul::new(sets, config.player_level);
    let best = search.search(&mut equipment, &candidates, &rules)?;
    tracing::info!(fitness = ?best.fitness.values(), "Search finished");

    Ok(SearchReport {
        strategy,
        candidates: filtered.len(),
        permutations,
        rules: rules.rule_names().into_iter().map(str::to_string).collect(),
        best,
    })
}
