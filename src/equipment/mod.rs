//! Equipment aggregate, stat snapshots and permutation enumeration

pub mod aggregate;
pub mod permutations;
pub mod snapshot;

pub use aggregate::EquipmentSimul;
pub use permutations::{CandidateLists, Permutation, PermutationIter};
pub use snapshot::EquipmentPermutationData;
