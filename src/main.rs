//! Equip Sim - Command line optimizer
//!
//! Loads an item catalog and an optimizer config, narrows the player's
//! inventory down to candidates and prints the best equipment as JSON.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

use equip_sim::core::config::{OptimizerConfig, StrategyKind};
use equip_sim::core::error::{Result, SimError};
use equip_sim::core::types::ItemId;
use equip_sim::items::{load_catalog, ItemModelList};
use equip_sim::search::optimize;

/// Find the best equipment for a set of fitness rules
#[derive(Parser, Debug)]
#[command(name = "equip-sim")]
#[command(about = "Search a player's inventory for the best equipment")]
struct Args {
    /// Item catalog (JSON)
    #[arg(long)]
    catalog: PathBuf,

    /// Optimizer config (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma separated item ids, or a file with one id per line.
    /// The whole catalog is used when omitted
    #[arg(long)]
    inventory: Option<String>,

    /// Override the player level from the config
    #[arg(long)]
    level: Option<u32>,

    /// Override the search strategy from the config
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Seed for the genetic search
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_item_ids(text: &str) -> Result<Vec<ItemId>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map(ItemId)
                .map_err(|_| SimError::InvalidConfig(format!("bad item id '{}'", s)))
        })
        .collect()
}

fn read_inventory(arg: &str) -> Result<Vec<ItemId>> {
    let path = PathBuf::from(arg);
    if path.is_file() {
        parse_item_ids(&fs::read_to_string(path)?)
    } else {
        parse_item_ids(arg)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "equip_sim=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => OptimizerConfig::load(path)?,
        None => OptimizerConfig::default(),
    };
    if let Some(level) = args.level {
        config.player_level = level;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(seed) = args.seed {
        config.genetic.seed = Some(seed);
    }

    let catalog = load_catalog(&args.catalog)?;
    tracing::info!(items = catalog.len(), "Catalog loaded");

    let items = match &args.inventory {
        Some(arg) => ItemModelList::from_inventory(&catalog, &read_inventory(arg)?)?,
        None => catalog.all_items(),
    };

    let report = optimize(&config, &items, catalog.sets())?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_ids() {
        let ids = parse_item_ids("41000, 52003\n700000").unwrap();
        assert_eq!(ids, vec![ItemId(41000), ItemId(52003), ItemId(700000)]);
        assert!(parse_item_ids("12,abc").is_err());
    }
}
