use thiserror::Error;

use crate::core::types::{ItemId, ItemType, SetId, Slot};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Nothing to replace: both replaced and replacement item are empty")]
    NothingToReplace,

    #[error("Slot mismatch: expected {expected}, found {found}")]
    SlotMismatch { expected: Slot, found: Slot },

    #[error("Item type {0:?} can't be equipped")]
    NotEquippable(ItemType),

    #[error("Set {set} has no bonus stage for {count} items")]
    UnknownSetStage { set: SetId, count: usize },

    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("Invalid upgrade of item {id} to tier {tier}")]
    InvalidUpgrade { id: ItemId, tier: u8 },

    #[error("Unknown skill or attribute: {0}")]
    UnknownSkill(String),

    #[error("Rule {rule} produced a non-finite fitness value")]
    NonFiniteFitness { rule: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
