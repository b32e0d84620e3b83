pub mod config;
pub mod error;
pub mod types;

pub use config::{FilterConfig, GeneticConfig, OptimizerConfig, StrategyKind};
pub use error::{Result, SimError};
pub use types::{ItemId, ItemType, SetId, Slot, SLOT_COUNT};
