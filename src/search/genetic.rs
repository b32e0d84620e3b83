//! Genetic algorithm over equipment permutations
//!
//! For candidate spaces too large to brute force where slot interactions
//! (set bonuses) still matter. Individuals are full slot→item assignments.
//!
//! Each generation:
//! 1. Score every individual on the scratch aggregate
//! 2. Tournament: the fitter of two random picks survives, until the
//!    population is refilled
//! 3. Crossover: each slot of a child comes from either parent by coin flip
//! 4. Mutation: with `mutation_rate`, one random slot is rerolled
//!
//! The best individual ever scored is tracked outside the population.

use ahash::AHashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

use super::{EquipmentSearch, ScoredEquipment};
use crate::core::config::GeneticConfig;
use crate::core::error::Result;
use crate::core::types::{ItemId, Slot, SLOT_COUNT};
use crate::equipment::{CandidateLists, EquipmentPermutationData, EquipmentSimul, Permutation};
use crate::fitness::{FitnessResult, SimulFitnessRuleSet};
use crate::items::ItemModel;

type FitnessCache = AHashMap<[Option<ItemId>; SLOT_COUNT], FitnessResult>;

pub struct GeneticAlgorithm {
    config: GeneticConfig,
    rng: ChaCha8Rng,
}

impl GeneticAlgorithm {
    pub fn new(config: GeneticConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Run the configured number of generations and return the best equipment seen
    pub fn run(
        &mut self,
        equipment: &mut EquipmentSimul,
        candidates: &CandidateLists,
        rules: &SimulFitnessRuleSet,
    ) -> Result<EquipmentPermutationData> {
        self.search(equipment, candidates, rules)
            .map(|scored| scored.data)
    }

    fn random_individual(&mut self, candidates: &CandidateLists) -> Permutation {
        let mut individual = Permutation::new();
        for slot in Slot::ALL {
            individual.set(slot, self.random_candidate(candidates, slot));
        }
        individual
    }

    fn random_candidate(&mut self, candidates: &CandidateLists, slot: Slot) -> Option<Arc<ItemModel>> {
        let options = candidates.get(slot);
        options[self.rng.gen_range(0..options.len())].clone()
    }

    fn tournament(&mut self, fitness: &[FitnessResult]) -> usize {
        let a = self.rng.gen_range(0..fitness.len());
        let b = self.rng.gen_range(0..fitness.len());
        if fitness[b].is_greater_than(&fitness[a]) {
            b
        } else {
            a
        }
    }

    fn crossover(&mut self, first: &Permutation, second: &Permutation) -> Permutation {
        let mut child = Permutation::new();
        for slot in Slot::ALL {
            let parent = if self.rng.gen_bool(0.5) { first } else { second };
            child.set(slot, parent.get(slot).cloned());
        }
        child
    }

    fn mutate(&mut self, individual: &mut Permutation, candidates: &CandidateLists) {
        if self.rng.gen_bool(self.config.mutation_rate.clamp(0.0, 1.0)) {
            let slot = Slot::ALL[self.rng.gen_range(0..SLOT_COUNT)];
            let item = self.random_candidate(candidates, slot);
            individual.set(slot, item);
        }
    }
}

fn evaluate(
    cache: &mut FitnessCache,
    equipment: &mut EquipmentSimul,
    rules: &SimulFitnessRuleSet,
    individual: &Permutation,
) -> Result<FitnessResult> {
    let key = individual.key();
    if let Some(hit) = cache.get(&key) {
        return Ok(hit.clone());
    }
    equipment.apply(individual)?;
    let fitness = rules.get_fitness_result(&equipment.snapshot())?;
    cache.insert(key, fitness.clone());
    Ok(fitness)
}

impl EquipmentSearch for GeneticAlgorithm {
    fn name(&self) -> &'static str {
        "genetic"
    }

    fn search(
        &mut self,
        equipment: &mut EquipmentSimul,
        candidates: &CandidateLists,
        rules: &SimulFitnessRuleSet,
    ) -> Result<ScoredEquipment> {
        let size = self.config.population_size.max(2);
        let mut cache = FitnessCache::default();

        let mut population: Vec<Permutation> =
            (0..size).map(|_| self.random_individual(candidates)).collect();
        let mut best: Option<(Permutation, FitnessResult)> = None;

        for generation in 0..=self.config.generations {
            let mut fitness = Vec::with_capacity(population.len());
            for individual in &population {
                fitness.push(evaluate(&mut cache, equipment, rules, individual)?);
            }

            for (individual, score) in population.iter().zip(fitness.iter()) {
                let improved = match &best {
                    None => true,
                    Some((_, best_score)) => score.is_greater_than(best_score),
                };
                if improved {
                    best = Some((individual.clone(), score.clone()));
                }
            }

            if let Some((_, best_score)) = &best {
                tracing::debug!(
                    generation,
                    best = ?best_score.values(),
                    cached = cache.len(),
                    "Genetic generation scored"
                );
            }

            // The extra pass only scores the last generation's children
            if generation == self.config.generations {
                break;
            }

            let parents: Vec<usize> = (0..size).map(|_| self.tournament(&fitness)).collect();
            let mut next = Vec::with_capacity(size);
            for pair in parents.chunks(2) {
                let first = &population[pair[0]];
                let second = &population[*pair.get(1).unwrap_or(&pair[0])];
                for _ in 0..2 {
                    let mut child = self.crossover(first, second);
                    self.mutate(&mut child, candidates);
                    next.push(child);
                }
            }
            next.truncate(size);
            population = next;
        }

        let (winner, fitness) = match best {
            Some(best) => best,
            None => (Permutation::new(), rules.generate_empty_result()),
        };
        equipment.empty();
        equipment.apply(&winner)?;
        Ok(ScoredEquipment {
            data: equipment.snapshot(),
            fitness,
        })
    }
}
