//! Equip Sim - Equipment optimization for The West characters
//!
//! Items add bonuses, complete sets add more, and a fitness rule set decides
//! which of two loadouts is better. The search strategies walk the candidate
//! space to find the best loadout for a given rule set.

pub mod core;
pub mod equipment;
pub mod fitness;
pub mod items;
pub mod search;
pub mod stats;
