#![forbid(unsafe_code)]

//! Group planning for N-way layouts.
//!
//! Everything here is a pure function of its inputs:
//!
//! - [`consolidate_groups`] folds the lowest-aggregate groups into a single
//!   catch-all group so the number of columns stays bounded.
//! - [`rank_groups`] orders groups by descending aggregate metric with a
//!   stable sort, so ties keep their first-encountered order.
//! - [`fit_shelf_budget`] folds trailing groups into the catch-all until
//!   every group can claim shelves of its own.
//! - [`pack_columns`] places groups into columns first-fit, in rank order.
//! - [`format_metric`] renders an aggregate for a group label.
//!
//! [`LayoutPlan`] ties these together; the engine fills in shelf indices once
//! the registry has packed each group.

use tracing::trace;

use crate::model::ItemId;

/// A group with its aggregate metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredGroup {
    pub key: String,
    pub items: Vec<ItemId>,
    pub aggregate: f64,
}

impl ScoredGroup {
    pub fn new(key: impl Into<String>, items: Vec<ItemId>, metric: impl Fn(&ItemId) -> f64) -> Self {
        let aggregate = aggregate(&items, metric);
        Self {
            key: key.into(),
            items,
            aggregate,
        }
    }
}

/// Sum of `metric` over `items`. Non-finite values count as 0.
pub fn aggregate(items: &[ItemId], metric: impl Fn(&ItemId) -> f64) -> f64 {
    items
        .iter()
        .map(|id| metric(id))
        .filter(|v| v.is_finite())
        .fold(0.0, |acc, v| acc + v)
}

/// Stable sort by descending aggregate.
pub fn rank_groups(mut groups: Vec<ScoredGroup>) -> Vec<ScoredGroup> {
    groups.sort_by(|a, b| b.aggregate.total_cmp(&a.aggregate));
    groups
}

/// Keep the top `max_groups - 1` groups by aggregate and fold the rest into
/// `others_key`. Inputs with at most `max_groups` groups are returned as is.
///
/// The result is ranked. The catch-all group's aggregate is the sum of the
/// groups it absorbed, and it is merged into a kept group of the same key if
/// there is one.
pub fn consolidate_groups(
    groups: Vec<ScoredGroup>,
    max_groups: usize,
    others_key: &str,
) -> Vec<ScoredGroup> {
    if groups.len() <= max_groups {
        return groups;
    }
    let keep = max_groups.saturating_sub(1).max(1);
    let mut ranked = rank_groups(groups);
    let folded = ranked.split_off(keep);

    let mut others = ScoredGroup {
        key: others_key.to_string(),
        items: Vec::new(),
        aggregate: 0.0,
    };
    for group in folded {
        trace!(key = %group.key, items = group.items.len(), "folding group into catch-all");
        others.items.extend(group.items);
        others.aggregate += group.aggregate;
    }

    match ranked.iter_mut().find(|g| g.key == others.key) {
        Some(existing) => {
            existing.items.extend(others.items);
            existing.aggregate += others.aggregate;
        }
        None => ranked.push(others),
    }
    rank_groups(ranked)
}

/// Shelves a group of `len` items claims at `capacity` items per shelf.
pub fn shelves_needed(len: usize, capacity: usize) -> usize {
    len.div_ceil(capacity.max(1))
}

/// Fold trailing groups into `others_key` until the groups fit on
/// `shelf_count` shelves without sharing any.
///
/// Groups are walked in rank order and kept while their shelves fit in
/// `shelf_count - 1`; the first group that does not fit and every group
/// ranked below it go into the catch-all, which takes whatever shelves
/// remain. Empty groups need no shelves and are always kept. Inputs that
/// already fit are returned as is.
pub fn fit_shelf_budget(
    groups: Vec<ScoredGroup>,
    capacity: usize,
    shelf_count: usize,
    others_key: &str,
) -> Vec<ScoredGroup> {
    let needed: usize = groups
        .iter()
        .map(|g| shelves_needed(g.items.len(), capacity))
        .sum();
    if needed <= shelf_count {
        return groups;
    }

    let room = shelf_count.saturating_sub(1);
    let mut used = 0;
    let mut folding = false;
    let mut kept = Vec::with_capacity(groups.len());
    let mut others = ScoredGroup {
        key: others_key.to_string(),
        items: Vec::new(),
        aggregate: 0.0,
    };
    for group in rank_groups(groups) {
        if group.key == others_key {
            others.items.extend(group.items);
            others.aggregate += group.aggregate;
            continue;
        }
        let need = shelves_needed(group.items.len(), capacity);
        if need == 0 || (!folding && used + need <= room) {
            used += need;
            kept.push(group);
            continue;
        }
        folding = true;
        trace!(key = %group.key, shelves = need, "group does not fit, folding into catch-all");
        others.items.extend(group.items);
        others.aggregate += group.aggregate;
    }
    kept.push(others);
    rank_groups(kept)
}

/// Column and vertical offset assigned to one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSlot {
    pub column: usize,
    pub row_offset: f32,
}

/// First-fit vertical bin packing.
///
/// Each height goes into the first column whose accumulated height plus this
/// one stays within `max_column_height`; otherwise a new column opens. A
/// height taller than the limit gets a column to itself. Input order is
/// preserved; nothing is re-sorted by size.
pub fn pack_columns(heights: &[f32], max_column_height: f32) -> Vec<ColumnSlot> {
    let mut columns: Vec<f32> = Vec::new();
    heights
        .iter()
        .map(|&height| {
            let fit = columns
                .iter()
                .position(|&used| used + height <= max_column_height);
            let column = match fit {
                Some(column) => column,
                None => {
                    columns.push(0.0);
                    columns.len() - 1
                }
            };
            let row_offset = columns[column];
            columns[column] += height;
            ColumnSlot { column, row_offset }
        })
        .collect()
}

/// Three significant digits with a T/B/M/K suffix: `1.23B`, `450M`, `12.0K`.
pub fn format_metric(value: f64) -> String {
    const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in SCALES {
        if value >= scale {
            return format!("{}{suffix}", three_significant(value / scale));
        }
    }
    three_significant(value)
}

/// `<key> - <formatted aggregate>`.
pub fn label_text(key: &str, aggregate: f64) -> String {
    format!("{key} - {}", format_metric(aggregate))
}

/// Mantissa of `value` to three significant digits, without any exponent.
fn three_significant(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0.00".to_string();
    }
    let magnitude = value.abs();
    let mut exponent = magnitude.log10().floor() as i32;
    if (magnitude / 10f64.powi(exponent - 2)).round() >= 1000.0 {
        exponent += 1;
    }
    if exponent >= 3 {
        return format!("{:.2}", value / 10f64.powi(exponent));
    }
    let decimals = usize::try_from(2 - exponent).unwrap_or(0);
    format!("{value:.decimals$}")
}

/// One group in a [`LayoutPlan`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedGroup {
    pub key: String,
    /// 0 is the highest aggregate.
    pub rank: usize,
    pub aggregate: f64,
    pub items: Vec<ItemId>,
    /// Shelves holding the group, in fill order. Empty for empty groups.
    pub shelf_indices: Vec<usize>,
    pub column: usize,
    pub row_offset: f32,
    /// Most shelves the group may claim. Extra items stack on its last one.
    pub shelf_limit: usize,
    /// The group ran out of shelves and spilled onto the last one.
    pub overflowed: bool,
}

impl PlannedGroup {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last_shelf(&self) -> Option<usize> {
        self.shelf_indices.last().copied()
    }

    pub fn label(&self) -> String {
        label_text(&self.key, self.aggregate)
    }
}

/// Ranked groups and, once packed, their shelves and columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPlan {
    groups: Vec<PlannedGroup>,
}

impl LayoutPlan {
    /// Consolidate to `max_groups` and rank.
    pub fn build(groups: Vec<ScoredGroup>, max_groups: usize, others_key: &str) -> Self {
        Self::from_ranked(rank_groups(consolidate_groups(groups, max_groups, others_key)))
    }

    /// [`build`](Self::build), then fit the groups onto `shelf_count` shelves
    /// of `capacity` items and set each group's shelf limit.
    pub fn build_within(
        groups: Vec<ScoredGroup>,
        max_groups: usize,
        others_key: &str,
        capacity: usize,
        shelf_count: usize,
    ) -> Self {
        let consolidated = consolidate_groups(groups, max_groups, others_key);
        let fitted = fit_shelf_budget(consolidated, capacity, shelf_count, others_key);
        let reserved: usize = fitted
            .iter()
            .filter(|g| g.key != others_key)
            .map(|g| shelves_needed(g.items.len(), capacity))
            .sum();
        let mut plan = Self::from_ranked(rank_groups(fitted));
        for group in &mut plan.groups {
            group.shelf_limit = if group.key == others_key {
                shelf_count.saturating_sub(reserved).max(1)
            } else {
                shelves_needed(group.items.len(), capacity)
            };
        }
        plan
    }

    fn from_ranked(ranked: Vec<ScoredGroup>) -> Self {
        Self {
            groups: ranked
                .into_iter()
                .enumerate()
                .map(|(rank, group)| PlannedGroup {
                    key: group.key,
                    rank,
                    aggregate: group.aggregate,
                    items: group.items,
                    shelf_indices: Vec::new(),
                    column: 0,
                    row_offset: 0.0,
                    shelf_limit: usize::MAX,
                    overflowed: false,
                })
                .collect(),
        }
    }

    /// Groups in rank order.
    pub fn groups(&self) -> &[PlannedGroup] {
        &self.groups
    }

    pub(crate) fn groups_mut(&mut self) -> &mut [PlannedGroup] {
        &mut self.groups
    }

    pub fn group(&self, key: &str) -> Option<&PlannedGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// The rank 0 group.
    pub fn highest(&self) -> Option<&PlannedGroup> {
        self.groups.first()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    /// Every item in rank order, then member order.
    pub fn ordered_items(&self) -> Vec<ItemId> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter().cloned())
            .collect()
    }

    /// Pack groups with shelves into columns. Empty groups take no space.
    pub(crate) fn pack(&mut self, shelf_height: f32, max_column_height: f32) {
        let placed: Vec<usize> = (0..self.groups.len())
            .filter(|&i| !self.groups[i].shelf_indices.is_empty())
            .collect();
        let heights: Vec<f32> = placed
            .iter()
            .map(|&i| self.groups[i].shelf_indices.len() as f32 * shelf_height)
            .collect();
        for (&i, slot) in placed.iter().zip(pack_columns(&heights, max_column_height)) {
            self.groups[i].column = slot.column;
            self.groups[i].row_offset = slot.row_offset;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }
}
