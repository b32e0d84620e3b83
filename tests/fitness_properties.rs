//! Property tests for the fitness comparator and equipment aggregation

use proptest::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

use equip_sim::core::types::{ItemType, Slot};
use equip_sim::equipment::{CandidateLists, EquipmentSimul};
use equip_sim::fitness::FitnessResult;
use equip_sim::items::{ItemBonus, ItemModel, ItemSet, ItemSetList};

fn values(len: usize) -> impl Strategy<Value = Vec<f64>> {
    // Small integer grid so ties actually happen
    prop::collection::vec((0i32..5).prop_map(f64::from), len)
}

fn item(id: u64, item_type: ItemType, workpoints: f64, item_drop: f64) -> Arc<ItemModel> {
    Arc::new(
        ItemModel::new(id, "item", item_type)
            .with_set("set_pair")
            .with_bonus(ItemBonus {
                workpoints,
                item_drop,
                ..Default::default()
            }),
    )
}

proptest! {
    /// With zero tolerance exactly one of greater, less, equal holds
    #[test]
    fn prop_trichotomy_without_tolerance(a in values(3), b in values(3)) {
        let a = FitnessResult::new(a, 0.0);
        let b = FitnessResult::new(b, 0.0);

        let outcomes = [a.is_greater_than(&b), a.is_less_than(&b), a == b];
        prop_assert_eq!(outcomes.iter().filter(|o| **o).count(), 1);
        prop_assert_eq!(a.is_greater_than(&b), b.is_less_than(&a));
    }

    /// Greater is antisymmetric for any tolerance
    #[test]
    fn prop_greater_is_antisymmetric(a in values(3), b in values(3), c in 0.0f64..0.5) {
        let a = FitnessResult::new(a, c);
        let b = FitnessResult::new(b, c);
        prop_assert!(!(a.is_greater_than(&b) && b.is_greater_than(&a)));
        prop_assert!(!a.is_greater_than(&a));
    }

    /// compare agrees with the lexicographic order when there is no band
    #[test]
    fn prop_compare_is_lexicographic(a in values(3), b in values(3)) {
        let expected = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        let a = FitnessResult::new(a, 0.0);
        let b = FitnessResult::new(b, 0.0);
        prop_assert_eq!(a.compare(&b), expected);
    }

    /// Totals don't depend on the order items are equipped in
    #[test]
    fn prop_aggregation_is_order_independent(
        head in 0.0f64..10.0,
        belt in 0.0f64..10.0,
        drop in 0.0f64..1.0,
        level in 1u32..100,
    ) {
        let sets: ItemSetList = vec![ItemSet::new("set_pair", "Pair").with_stage(
            2,
            ItemBonus { workpoints: 3.0, ..Default::default() },
        )]
        .into_iter()
        .collect();
        let sets = Arc::new(sets);
        let hat = item(1000, ItemType::Head, head, drop);
        let strap = item(2000, ItemType::Belt, belt, 0.0);

        let mut forward = EquipmentSimul::new(Arc::clone(&sets), level);
        forward.replace_item(None, Some(Arc::clone(&hat))).unwrap();
        forward.replace_item(None, Some(Arc::clone(&strap))).unwrap();

        let mut backward = EquipmentSimul::new(sets, level);
        backward.replace_item(None, Some(strap)).unwrap();
        backward.replace_item(None, Some(hat)).unwrap();

        prop_assert_eq!(forward.snapshot(), backward.snapshot());
        prop_assert!((forward.workpoints() - (head + belt + 3.0)).abs() < 1e-9);
    }

    /// The iterator yields exactly the product of the list sizes
    #[test]
    fn prop_permutation_count(heads in 1usize..4, belts in 1usize..4, boots in 1usize..3) {
        let mut candidates = CandidateLists::new();
        candidates.set(
            Slot::Headgear,
            (0..heads).map(|i| Some(item(1000 * (i as u64 + 1), ItemType::Head, 1.0, 0.0))).collect(),
        );
        candidates.set(
            Slot::Belt,
            (0..belts).map(|i| Some(item(10_000 * (i as u64 + 1), ItemType::Belt, 1.0, 0.0))).collect(),
        );
        candidates.set(
            Slot::Boots,
            (0..boots).map(|i| Some(item(100_000 * (i as u64 + 1), ItemType::Foot, 1.0, 0.0))).collect(),
        );

        let expected = (heads * belts * boots) as u128;
        prop_assert_eq!(candidates.calc_permutations(), expected);
        prop_assert_eq!(candidates.permutations().count() as u128, expected);
    }
}
