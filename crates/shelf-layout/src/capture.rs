#![forbid(unsafe_code)]

//! Position capture for FLIP transitions.
//!
//! A transition snapshots every item before and after a membership change,
//! then animates each item from the difference back to zero. The two
//! snapshots must come from the same ordered item list: deltas are paired by
//! index, and a mismatch would move the wrong item.
//!
//! Items the surface cannot resolve are left out of a snapshot and reported
//! in [`SnapshotSet::missing`], so the caller can drop them from its working
//! set before mutating anything.

use shelf_core::geometry::{Point, Rect};
use tracing::debug;

use crate::model::ItemId;

/// Anything that can report where an item is currently drawn.
pub trait Surface {
    fn bounding_box(&self, id: &ItemId) -> Option<Rect>;
}

/// One item's drawn position at capture time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub item: ItemId,
    pub top: f32,
    pub left: f32,
}

/// Displacement from the end position back to the start position.
#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    pub item: ItemId,
    pub dx: f32,
    pub dy: f32,
}

impl Delta {
    pub fn offset(&self) -> Point {
        Point::new(self.dx, self.dy)
    }
}

/// Result of [`snapshot_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotSet {
    /// Resolved items, in input order.
    pub entries: Vec<Snapshot>,
    /// Items the surface could not resolve, in input order.
    pub missing: Vec<ItemId>,
}

impl SnapshotSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read the current box of every item in `items`, preserving order.
pub fn snapshot_all<'a, S, I>(surface: &S, items: I) -> SnapshotSet
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = &'a ItemId>,
{
    let mut set = SnapshotSet::default();
    for id in items {
        match surface.bounding_box(id) {
            Some(rect) => set.entries.push(Snapshot {
                item: id.clone(),
                top: rect.top(),
                left: rect.left(),
            }),
            None => {
                debug!(item = %id, "no drawn box for item, skipping capture");
                set.missing.push(id.clone());
            }
        }
    }
    set
}

/// Pair `start` and `end` by index: `dx = start.left - end.left`,
/// `dy = start.top - end.top`.
///
/// Extra entries on either side are ignored.
pub fn compute_deltas(start: &[Snapshot], end: &[Snapshot]) -> Vec<Delta> {
    debug_assert_eq!(start.len(), end.len(), "snapshots differ in length");
    start
        .iter()
        .zip(end)
        .map(|(before, after)| {
            debug_assert_eq!(
                before.item, after.item,
                "snapshots taken in different orders"
            );
            Delta {
                item: before.item.clone(),
                dx: before.left - after.left,
                dy: before.top - after.top,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedSurface(HashMap<ItemId, Rect>);

    impl Surface for FixedSurface {
        fn bounding_box(&self, id: &ItemId) -> Option<Rect> {
            self.0.get(id).copied()
        }
    }

    fn snap(id: &str, left: f32, top: f32) -> Snapshot {
        Snapshot {
            item: id.into(),
            top,
            left,
        }
    }

    #[test]
    fn delta_is_start_minus_end() {
        let deltas = compute_deltas(&[snap("a", 100.0, 70.0)], &[snap("a", 40.0, 200.0)]);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].dx, 60.0);
        assert_eq!(deltas[0].dy, -130.0);
        assert_eq!(deltas[0].offset(), Point::new(60.0, -130.0));
    }

    #[test]
    fn snapshot_keeps_input_order_and_reports_missing() {
        let surface = FixedSurface(HashMap::from([
            (ItemId::from("a"), Rect::new(1.0, 2.0, 10.0, 10.0)),
            (ItemId::from("c"), Rect::new(5.0, 6.0, 10.0, 10.0)),
        ]));
        let order = [ItemId::from("c"), ItemId::from("b"), ItemId::from("a")];
        let set = snapshot_all(&surface, &order);
        let seen: Vec<&str> = set.entries.iter().map(|s| s.item.as_str()).collect();
        assert_eq!(seen, vec!["c", "a"]);
        assert_eq!(set.missing, vec![ItemId::from("b")]);
        assert_eq!(set.entries[0].left, 5.0);
        assert_eq!(set.entries[0].top, 6.0);
    }

    #[test]
    fn empty_snapshots_give_no_deltas() {
        assert!(compute_deltas(&[], &[]).is_empty());
        let surface = FixedSurface(HashMap::new());
        assert!(snapshot_all(&surface, &Vec::<ItemId>::new()).is_empty());
    }

    #[test]
    #[should_panic(expected = "different orders")]
    #[cfg(debug_assertions)]
    fn mismatched_order_is_caught() {
        compute_deltas(&[snap("a", 0.0, 0.0)], &[snap("b", 0.0, 0.0)]);
    }
}
