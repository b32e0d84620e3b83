//! Greedy search: best item per slot, each judged on its own
//!
//! Every candidate is scored alone on an otherwise empty character and the
//! per-slot winners are combined. Set bonuses only appear once several
//! slots are filled together, so this search can't see them; it is an
//! approximation that is exact only when slots don't interact.

use std::sync::Arc;

use super::{EquipmentSearch, ScoredEquipment};
use crate::core::error::Result;
use crate::core::types::Slot;
use crate::equipment::{CandidateLists, EquipmentPermutationData, EquipmentSimul, Permutation};
use crate::fitness::{FitnessResult, SimulFitnessRuleSet};
use crate::items::ItemModel;

#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl EquipmentSearch for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn search(
        &mut self,
        equipment: &mut EquipmentSimul,
        candidates: &CandidateLists,
        rules: &SimulFitnessRuleSet,
    ) -> Result<ScoredEquipment> {
        let mut winners = Permutation::new();

        for slot in Slot::ALL {
            let mut best: Option<(Option<Arc<ItemModel>>, FitnessResult)> = None;

            for candidate in candidates.get(slot) {
                equipment.empty();
                equipment.set_slot(slot, candidate.clone())?;
                let fitness = rules.get_fitness_result(&equipment.snapshot())?;

                let better = match &best {
                    None => true,
                    Some((_, best_fitness)) => fitness.is_greater_than(best_fitness),
                };
                if better {
                    best = Some((candidate.clone(), fitness));
                }
            }

            if let Some((item, _)) = best {
                winners.set(slot, item);
            }
        }

        equipment.empty();
        equipment.apply(&winners)?;
        let data = equipment.snapshot();
        let fitness = rules.get_fitness_result(&data)?;
        tracing::debug!(fitness = ?fitness.values(), "Greedy search finished");

        Ok(ScoredEquipment { data, fitness })
    }
}

/// Union of the best item of every slot, each slot judged independently
pub fn maximum_equipment_greedy(
    equipment: &mut EquipmentSimul,
    candidates: &CandidateLists,
    rules: &SimulFitnessRuleSet,
) -> Result<EquipmentPermutationData> {
    Greedy
        .search(equipment, candidates, rules)
        .map(|scored| scored.data)
}
