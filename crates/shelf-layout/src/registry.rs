#![forbid(unsafe_code)]

//! Shelf registry: the fixed, ordered set of shelves and their membership.
//!
//! The registry is the single source of truth for which item sits on which
//! shelf. Occupant counts are derived from the member lists, so they always
//! equal the true number of members.
//!
//! Every mutator is crate-private. Outside this crate the registry is
//! read-only; membership changes only through the
//! [`LayoutEngine`](crate::LayoutEngine).
//!
//! # Packing rule
//!
//! [`ShelfRegistry::assign_group_to_shelves`] claims a contiguous run of
//! unclaimed shelves within a [`Lane`] and fills each one to the requested
//! capacity before moving on. A group of `n` items at capacity `c` claims
//! `ceil(n / c)` shelves. Binary and grouped layouts share this rule.
//!
//! # Overflow
//!
//! Items are never dropped. [`append`](ShelfRegistry::append) overflows onto
//! the last shelf when every shelf is full. A group that runs out of lane
//! shelves, or reaches its shelf limit, stacks the rest on the last shelf of
//! its own run and the run is marked [`overflowed`](ShelfRun::overflowed). A
//! run never contains a shelf claimed by another group.

use std::collections::HashMap;

use tracing::warn;

use crate::model::ItemId;

/// Where an item currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub shelf: usize,
    /// Position within the shelf, left to right.
    pub position: usize,
}

/// One shelf slot of the bookshelf.
#[derive(Debug, Clone, PartialEq)]
pub struct Shelf {
    index: usize,
    capacity: usize,
    items: Vec<ItemId>,
    group_key: Option<String>,
    visible: bool,
    claimed: bool,
}

impl Shelf {
    fn new(index: usize, capacity: usize) -> Self {
        Self {
            index,
            capacity,
            items: Vec::new(),
            group_key: None,
            visible: true,
            claimed: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn occupant_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn group_key(&self) -> Option<&str> {
        self.group_key.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn has_room(&self) -> bool {
        self.items.len() < self.capacity
    }
}

/// Which shelves a group may claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    All,
    /// Indices 1, 3, 5, ...
    Odd,
    /// Indices 0, 2, 4, ...
    Even,
}

impl Lane {
    pub fn contains(self, index: usize) -> bool {
        match self {
            Self::All => true,
            Self::Odd => index % 2 == 1,
            Self::Even => index % 2 == 0,
        }
    }
}

/// Shelves consumed by one group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShelfRun {
    pub shelf_indices: Vec<usize>,
    /// Some items landed past the requested capacity because the lane ran out.
    pub overflowed: bool,
}

impl ShelfRun {
    pub fn shelf_count(&self) -> usize {
        self.shelf_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelf_indices.is_empty()
    }

    pub fn last_shelf(&self) -> Option<usize> {
        self.shelf_indices.last().copied()
    }
}

/// The fixed shelf set and its membership.
#[derive(Debug, Clone)]
pub struct ShelfRegistry {
    shelves: Vec<Shelf>,
    locations: HashMap<ItemId, Slot>,
}

impl ShelfRegistry {
    /// `shelf_count` shelves (at least one) of equal `capacity`.
    #[must_use]
    pub fn new(shelf_count: usize, capacity: usize) -> Self {
        Self::from_capacities(vec![capacity; shelf_count.max(1)])
    }

    /// One shelf per entry, in order. An empty list yields a single shelf of
    /// capacity 1 so that items always have somewhere to go.
    #[must_use]
    pub fn from_capacities(capacities: Vec<usize>) -> Self {
        let capacities = if capacities.is_empty() {
            vec![1]
        } else {
            capacities
        };
        Self {
            shelves: capacities
                .into_iter()
                .enumerate()
                .map(|(index, capacity)| Shelf::new(index, capacity.max(1)))
                .collect(),
            locations: HashMap::new(),
        }
    }

    // ---- readers ----

    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    pub fn shelf(&self, index: usize) -> Option<&Shelf> {
        self.shelves.get(index)
    }

    pub fn len(&self) -> usize {
        self.shelves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }

    pub fn position_of(&self, id: &ItemId) -> Option<Slot> {
        self.locations.get(id).copied()
    }

    /// Sum of occupant counts over every shelf.
    pub fn total_occupants(&self) -> usize {
        self.shelves.iter().map(Shelf::occupant_count).sum()
    }

    /// Occupant count per shelf, in shelf order.
    pub fn occupancy(&self) -> Vec<usize> {
        self.shelves.iter().map(Shelf::occupant_count).collect()
    }

    /// Member ids per shelf, in shelf order.
    pub fn membership(&self) -> Vec<Vec<ItemId>> {
        self.shelves.iter().map(|s| s.items.clone()).collect()
    }

    // ---- mutators (engine only) ----

    /// Empty every shelf and drop group metadata. Visibility is untouched.
    pub(crate) fn reset(&mut self) {
        for shelf in &mut self.shelves {
            shelf.items.clear();
            shelf.group_key = None;
            shelf.claimed = false;
        }
        self.locations.clear();
    }

    /// Place `item` on the first shelf with room, or on the last shelf.
    pub(crate) fn append(&mut self, item: ItemId) -> usize {
        let last = self.shelves.len() - 1;
        let target = self
            .shelves
            .iter()
            .position(Shelf::has_room)
            .unwrap_or(last);
        self.place(target, item);
        target
    }

    /// [`append`](Self::append) each item in order, then hide empty shelves.
    pub(crate) fn append_many(&mut self, items: impl IntoIterator<Item = ItemId>) {
        for item in items {
            self.append(item);
        }
        self.refresh_visibility();
    }

    /// Claim a contiguous run of lane shelves for `items`, filling each to
    /// `capacity_per_shelf`.
    pub(crate) fn assign_group_to_shelves(
        &mut self,
        items: &[ItemId],
        capacity_per_shelf: usize,
        lane: Lane,
    ) -> ShelfRun {
        self.assign_group_capped(items, capacity_per_shelf, lane, usize::MAX)
    }

    /// Like [`assign_group_to_shelves`](Self::assign_group_to_shelves), but
    /// claims at most `max_shelves` shelves.
    pub(crate) fn assign_group_capped(
        &mut self,
        items: &[ItemId],
        capacity_per_shelf: usize,
        lane: Lane,
        max_shelves: usize,
    ) -> ShelfRun {
        if items.is_empty() {
            return ShelfRun::default();
        }
        let capacity = capacity_per_shelf.max(1);
        let needed = items.len().div_ceil(capacity);

        let lane_shelves: Vec<usize> = (0..self.shelves.len())
            .filter(|&i| lane.contains(i))
            .collect();
        let run: Vec<usize> = lane_shelves
            .iter()
            .copied()
            .filter(|&i| !self.shelves[i].claimed)
            .take(needed.min(max_shelves))
            .collect();
        let result = ShelfRun {
            shelf_indices: run.clone(),
            overflowed: run.len() < needed,
        };

        let Some(&overflow_shelf) = run.last() else {
            // Nothing left to claim. Park the items without claiming so the
            // shelf stays with its owner.
            let fallback = lane_shelves
                .last()
                .copied()
                .unwrap_or(self.shelves.len() - 1);
            warn!(
                items = items.len(),
                fallback, "no free shelf for group, parking items unclaimed"
            );
            for item in items {
                self.place(fallback, item.clone());
            }
            return result;
        };

        for (chunk_index, chunk) in items.chunks(capacity).enumerate() {
            let shelf = run.get(chunk_index).copied().unwrap_or(overflow_shelf);
            for item in chunk {
                self.place(shelf, item.clone());
            }
        }
        for &i in &run {
            self.shelves[i].claimed = true;
        }
        if result.overflowed {
            warn!(
                items = items.len(),
                needed,
                claimed = run.len(),
                overflow_shelf,
                "group out of shelves, overflowing onto its last shelf"
            );
        }
        result
    }

    pub(crate) fn set_group_key(&mut self, index: usize, key: &str) {
        if let Some(shelf) = self.shelves.get_mut(index) {
            shelf.group_key = Some(key.to_string());
        }
    }

    /// Show shelves with members, hide empty ones.
    pub(crate) fn refresh_visibility(&mut self) {
        for shelf in &mut self.shelves {
            shelf.visible = !shelf.items.is_empty();
        }
    }

    /// Show claimed shelves only.
    pub(crate) fn hide_unclaimed(&mut self) {
        for shelf in &mut self.shelves {
            shelf.visible = shelf.claimed || !shelf.items.is_empty();
        }
    }

    fn place(&mut self, index: usize, item: ItemId) {
        let shelf = &mut self.shelves[index];
        let slot = Slot {
            shelf: index,
            position: shelf.items.len(),
        };
        shelf.items.push(item.clone());
        self.locations.insert(item, slot);
    }
}
