//! Property-based invariant tests for the shelf layout engine.
//!
//! 1. Item count is conserved by every operation, including rejected ones.
//! 2. Reset after any partition restores the load-time membership.
//! 3. Group packing claims `ceil(n / capacity)` shelves, filled in order.
//! 4. Plans rank groups by non-increasing aggregate, ties in input order.
//! 5. Column packing never overfills a column that holds more than one group.
//! 6. Binary partitions put every matching item on an odd shelf.
//! 7. Grouped layouts never share a shelf between groups, however few
//!    shelves there are.

use std::time::Duration;

use proptest::prelude::*;
use shelf_layout::plan::{LayoutPlan, ScoredGroup, pack_columns};
use shelf_layout::{GroupMap, ItemId, LayoutConfig, LayoutEngine};

const FRAME: Duration = Duration::from_millis(16);

// ── Helpers ─────────────────────────────────────────────────────────────

fn id(n: usize) -> ItemId {
    ItemId::new(format!("film{n}"))
}

fn engine(n: usize, metric: impl Fn(usize) -> f64) -> LayoutEngine {
    engine_with(LayoutConfig::default(), n, metric)
}

fn engine_with(config: LayoutConfig, n: usize, metric: impl Fn(usize) -> f64) -> LayoutEngine {
    LayoutEngine::with_items(config, (0..n).map(|i| (id(i), metric(i))))
}

fn run_until_idle(engine: &mut LayoutEngine) {
    let mut guard = 0;
    while !engine.is_idle() && guard < 10_000 {
        engine.tick(FRAME);
        guard += 1;
    }
}

/// Split `0..n` by `mask` into (matching, non_matching).
fn split(n: usize, mask: &[bool]) -> (Vec<ItemId>, Vec<ItemId>) {
    let (m, o): (Vec<usize>, Vec<usize>) = (0..n).partition(|&i| mask[i % mask.len()]);
    (m.into_iter().map(id).collect(), o.into_iter().map(id).collect())
}

/// Assign item `i` to group `labels[i % len]`.
fn grouping(n: usize, labels: &[u8]) -> GroupMap {
    let mut map = GroupMap::new();
    for i in 0..n {
        let key = format!("g{}", labels[i % labels.len()]);
        map.entry(key).or_default().push(id(i));
    }
    map
}

#[derive(Debug, Clone)]
enum Op {
    Binary(Vec<bool>),
    Grouped(Vec<u8>),
    Reset,
    Frames(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::collection::vec(any::<bool>(), 1..8).prop_map(Op::Binary),
        prop::collection::vec(0u8..9, 1..12).prop_map(Op::Grouped),
        Just(Op::Reset),
        (1u8..40).prop_map(Op::Frames),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Conservation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn operations_conserve_items(
        n in 1usize..60,
        ops in prop::collection::vec(op_strategy(), 1..12),
    ) {
        let mut engine = engine(n, |i| i as f64);
        for op in ops {
            match op {
                Op::Binary(mask) => {
                    let (m, o) = split(n, &mask);
                    let _ = engine.apply_binary_partition(&m, &o);
                }
                Op::Grouped(labels) => {
                    let _ = engine.apply_group_partition(&grouping(n, &labels));
                }
                Op::Reset => {
                    let _ = engine.reset_layout();
                }
                Op::Frames(count) => {
                    for _ in 0..count {
                        engine.tick(FRAME);
                    }
                }
            }
            prop_assert_eq!(engine.registry().total_occupants(), n);
            let placed = engine
                .canonical_order()
                .iter()
                .filter(|i| engine.registry().position_of(i).is_some())
                .count();
            prop_assert_eq!(placed, n);
        }
        run_until_idle(&mut engine);
        prop_assert!(engine.is_idle());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Reset restores load-time membership
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reset_restores_load_time(
        n in 1usize..60,
        labels in prop::collection::vec(0u8..9, 1..12),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let mut engine = engine(n, |i| (i % 7) as f64);
        let load_time = engine.registry().membership();

        let _ = engine.apply_group_partition(&grouping(n, &labels));
        run_until_idle(&mut engine);
        let (m, o) = split(n, &mask);
        let _ = engine.apply_binary_partition(&m, &o);
        run_until_idle(&mut engine);

        prop_assert!(engine.reset_layout().is_started());
        run_until_idle(&mut engine);
        prop_assert_eq!(engine.registry().membership(), load_time);
        prop_assert!(engine.items().iter().all(|i| i.offset.is_zero()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Single-group packing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn one_group_fills_shelves_in_order(n in 1usize..60) {
        let mut engine = engine(n, |_| 1.0);
        let mut groups = GroupMap::new();
        groups.insert("all".into(), (0..n).map(id).collect());
        let _ = engine.apply_group_partition(&groups);
        run_until_idle(&mut engine);

        let capacity = engine.config().items_per_shelf;
        let shelves = engine.registry().len();
        let needed = n.div_ceil(capacity).min(shelves);
        let occupancy = engine.registry().occupancy();
        for (shelf, &count) in occupancy.iter().enumerate() {
            if shelf + 1 < needed {
                prop_assert_eq!(count, capacity, "shelf {} not full", shelf);
            } else if shelf >= needed {
                prop_assert_eq!(count, 0, "shelf {} should be unused", shelf);
            }
        }
        prop_assert_eq!(occupancy.iter().sum::<usize>(), n);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Ranking
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plan_ranks_non_increasing_with_stable_ties(
        aggregates in prop::collection::vec(0u32..5, 1..5),
    ) {
        let groups: Vec<ScoredGroup> = aggregates
            .iter()
            .enumerate()
            .map(|(i, &a)| ScoredGroup {
                key: format!("k{i}"),
                items: vec![id(i)],
                aggregate: f64::from(a),
            })
            .collect();
        let plan = LayoutPlan::build(groups, 5, "Others");
        let ranked = plan.groups();
        for (rank, group) in ranked.iter().enumerate() {
            prop_assert_eq!(group.rank, rank);
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].aggregate >= pair[1].aggregate);
            if pair[0].aggregate == pair[1].aggregate {
                let a: usize = pair[0].key[1..].parse().unwrap_or_default();
                let b: usize = pair[1].key[1..].parse().unwrap_or_default();
                prop_assert!(a < b, "tie broke encounter order: {} before {}", a, b);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Column packing bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn columns_respect_height_limit(
        rows in prop::collection::vec(1u8..6, 0..12),
        limit_rows in 1u8..8,
    ) {
        let heights: Vec<f32> = rows.iter().map(|&r| f32::from(r) * 130.0).collect();
        let limit = f32::from(limit_rows) * 130.0;
        let slots = pack_columns(&heights, limit);
        prop_assert_eq!(slots.len(), heights.len());

        let columns = slots.iter().map(|s| s.column + 1).max().unwrap_or(0);
        for column in 0..columns {
            let members: Vec<usize> = (0..slots.len()).filter(|&i| slots[i].column == column).collect();
            prop_assert!(!members.is_empty(), "column {} left empty", column);
            let used: f32 = members.iter().map(|&i| heights[i]).sum();
            if members.len() > 1 {
                prop_assert!(used <= limit, "column {} overfilled: {}", column, used);
            }
            let mut expected = 0.0;
            for &i in &members {
                prop_assert_eq!(slots[i].row_offset, expected);
                expected += heights[i];
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Binary parity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn matching_items_sit_on_odd_shelves(
        n in 1usize..30,
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let mut engine = engine(n, |_| 0.0);
        let (m, o) = split(n, &mask);
        let _ = engine.apply_binary_partition(&m, &o);
        run_until_idle(&mut engine);

        for item in &m {
            let shelf = engine.registry().position_of(item).map(|s| s.shelf);
            prop_assert!(shelf.is_some_and(|s| s % 2 == 1), "{} on {:?}", item, shelf);
        }
        for item in &o {
            let shelf = engine.registry().position_of(item).map(|s| s.shelf);
            prop_assert!(shelf.is_some_and(|s| s % 2 == 0), "{} on {:?}", item, shelf);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Shelf ownership
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn groups_never_share_shelves(
        n in 1usize..60,
        shelf_count in 1usize..8,
        labels in prop::collection::vec(0u8..9, 1..12),
    ) {
        let mut config = LayoutConfig::default();
        config.shelf_count = shelf_count;
        let mut engine = engine_with(config, n, |i| (i % 5) as f64);
        let _ = engine.apply_group_partition(&grouping(n, &labels));
        run_until_idle(&mut engine);

        prop_assert_eq!(engine.registry().total_occupants(), n);
        let plan = engine.plan().cloned().unwrap_or_default();
        let mut claimed = vec![false; shelf_count];
        for group in plan.groups() {
            for &shelf in &group.shelf_indices {
                prop_assert!(!claimed[shelf], "shelf {} claimed twice", shelf);
                claimed[shelf] = true;
            }
            for item in &group.items {
                let shelf = engine.registry().position_of(item).map(|s| s.shelf);
                prop_assert!(shelf.is_some_and(|s| group.shelf_indices.contains(&s)));
            }
        }
        let mut labelled: Vec<usize> = engine.labels().iter().map(|l| l.shelf).collect();
        let count = labelled.len();
        labelled.sort_unstable();
        labelled.dedup();
        prop_assert_eq!(labelled.len(), count);
    }
}
