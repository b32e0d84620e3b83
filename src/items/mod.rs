//! Item system: item models, set bonuses, level scaling and the catalog

pub mod bonus;
pub mod catalog;
pub mod item;
pub mod item_set;
pub mod update_table;

pub use bonus::{ItemBonus, ResolvedBonus};
pub use catalog::{load_catalog, Catalog, ItemModelList};
pub use item::ItemModel;
pub use item_set::{ItemSet, ItemSetList, ItemSetStage};
pub use update_table::UpdateTable;
