//! Exhaustive search over every permutation
//!
//! Exact, but the cost is the product of all candidate list sizes. Only use
//! it once the candidates have been narrowed down.

use super::{EquipmentSearch, ScoredEquipment};
use crate::core::error::Result;
use crate::equipment::{CandidateLists, EquipmentPermutationData, EquipmentSimul};
use crate::fitness::SimulFitnessRuleSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl EquipmentSearch for BruteForce {
    fn name(&self) -> &'static str {
        "brute_force"
    }

    fn search(
        &mut self,
        equipment: &mut EquipmentSimul,
        candidates: &CandidateLists,
        rules: &SimulFitnessRuleSet,
    ) -> Result<ScoredEquipment> {
        let total = candidates.calc_permutations();
        tracing::debug!(permutations = %total, "Starting brute force search");

        let mut best_fitness = rules.generate_empty_result();
        let mut best: Option<EquipmentPermutationData> = None;
        let mut visited: u64 = 0;

        for permutation in candidates.permutations() {
            equipment.apply(&permutation)?;
            let data = equipment.snapshot();
            let fitness = rules.get_fitness_result(&data)?;
            visited += 1;

            if best.is_none() || fitness.is_greater_than(&best_fitness) {
                best_fitness = fitness;
                best = Some(data);
            }
        }

        tracing::debug!(visited, "Brute force search finished");

        let data = match best {
            Some(data) => data,
            None => {
                equipment.empty();
                let data = equipment.snapshot();
                best_fitness = rules.get_fitness_result(&data)?;
                data
            }
        };
        Ok(ScoredEquipment {
            data,
            fitness: best_fitness,
        })
    }
}

/// Best equipment among all permutations of `candidates`
pub fn maximum_equipment_value_brute_force(
    equipment: &mut EquipmentSimul,
    candidates: &CandidateLists,
    rules: &SimulFitnessRuleSet,
) -> Result<EquipmentPermutationData> {
    BruteForce
        .search(equipment, candidates, rules)
        .map(|scored| scored.data)
}
