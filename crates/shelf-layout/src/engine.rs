#![forbid(unsafe_code)]

//! The layout engine: partitions in, animated shelf layouts out.
//!
//! # Transition lifecycle
//!
//! ```text
//! Idle -> Capturing -> Mutating -> AnimatingDual -> Settling -> Idle
//! ```
//!
//! 1. The gate is acquired. A busy engine drops the request and reports
//!    [`Transition::Rejected`] without touching any state.
//! 2. Every item's drawn box is captured.
//! 3. Styling and shelf membership change in one step.
//! 4. Boxes are captured again and each item's visual offset is set to the
//!    difference, so nothing appears to move yet.
//! 5. Containers tween to their targets while item offsets tween back to
//!    zero. The two tween groups run independently and join on a
//!    [`CompletionLatch`] of two.
//! 6. On release of the latch shelves are resized to their content and a
//!    settle timer is scheduled on the gate. When it fires the gate is
//!    released and the post-layout hook runs once (binary and grouped
//!    transitions only).
//!
//! Time only moves through [`LayoutEngine::tick`].
//!
//! # Degradation
//!
//! Nothing here fails. Unknown ids are skipped, ids listed twice keep their
//! first occurrence, items left out of a partition are placed with the
//! non-matching items (binary) or under [`UNKNOWN_GROUP`] (grouped), and
//! shelf overflow lands on the group's own last shelf. Groups that would need
//! more shelves than exist are folded into the catch-all group first.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Duration;

use shelf_core::animation::{
    Animation, AnimationEvent, AnimationGroup, Callbacks, CompletionLatch, Delayed, StaggerMode,
    Tween, stagger_offsets,
};
use shelf_core::geometry::{Point, Rect};
use tracing::{debug, debug_span, trace, warn};

use crate::capture::{Delta, Snapshot, Surface, compute_deltas, snapshot_all};
use crate::catalog::ItemCatalog;
use crate::config::{LayoutConfig, TweenTiming};
use crate::gate::AnimationGate;
use crate::model::{GroupMap, ItemId, ItemState, ItemStyle, TransitionKind};
use crate::plan::{LayoutPlan, ScoredGroup, aggregate};
use crate::registry::{Lane, ShelfRegistry};
use crate::surface::{ContainerState, ShelfSurface};

/// Group collecting items a grouping request did not mention.
pub const UNKNOWN_GROUP: &str = "unknown";

/// Key reported for matching items in a binary [`LayoutOutcome`].
pub const MATCHING_KEY: &str = "matching";
/// Key reported for non-matching items in a binary [`LayoutOutcome`].
pub const NON_MATCHING_KEY: &str = "non_matching";

/// Whether a request began a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Transition {
    Started,
    /// Another transition holds the gate; the request was dropped.
    Rejected,
}

impl Transition {
    pub fn is_started(self) -> bool {
        self == Self::Started
    }
}

/// Where the engine is in the transition lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Capturing,
    Mutating,
    AnimatingDual,
    Settling,
}

/// Label attached to the last shelf of a group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLabel {
    pub shelf: usize,
    pub key: String,
    pub rank: usize,
    pub aggregate: f64,
    /// `<key> - <formatted aggregate>`.
    pub text: String,
}

/// Passed to the post-layout hook once a transition has settled.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    pub kind: TransitionKind,
    /// Groups that received shelves, in layout order.
    pub group_keys: Vec<String>,
    /// The rank 0 group of a grouped layout.
    pub highest: Option<String>,
}

/// The two captures of the most recent transition and their deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRecord {
    pub kind: TransitionKind,
    pub start: Vec<Snapshot>,
    pub end: Vec<Snapshot>,
    pub deltas: Vec<Delta>,
}

/// Post-layout callback.
pub type PostLayoutHook = Box<dyn FnMut(&LayoutOutcome)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateAction {
    Settle(TransitionKind),
}

type PointTweens<K> = Callbacks<AnimationGroup<K, Delayed<Tween<Point>>>>;

#[derive(Debug)]
struct ActiveTransition {
    kind: TransitionKind,
    compact: bool,
    containers: PointTweens<usize>,
    items: PointTweens<ItemId>,
    latch: CompletionLatch,
}

/// Shelf layout state plus the transition currently running on it.
pub struct LayoutEngine {
    config: LayoutConfig,
    registry: ShelfRegistry,
    /// Load order; the canonical layout is `append_many(order)`.
    order: Vec<ItemId>,
    items: Vec<ItemState>,
    index: HashMap<ItemId, usize>,
    containers: Vec<ContainerState>,
    widths: AnimationGroup<usize, Tween<f32>>,
    gate: AnimationGate<GateAction>,
    phase: Phase,
    transition: Option<ActiveTransition>,
    plan: Option<LayoutPlan>,
    labels: Vec<GroupLabel>,
    last_capture: Option<CaptureRecord>,
    hook: Option<PostLayoutHook>,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("phase", &self.phase)
            .field("items", &self.items.len())
            .field("shelves", &self.registry.len())
            .field("labels", &self.labels)
            .field("has_hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}

impl LayoutEngine {
    /// Load every catalog item in order and lay them out canonically.
    pub fn new<C: ItemCatalog + ?Sized>(config: LayoutConfig, catalog: &C) -> Self {
        let items: Vec<(ItemId, f64)> = catalog
            .items()
            .into_iter()
            .map(|id| {
                let metric = catalog.metric(&id, &config.metric_path);
                (id, metric)
            })
            .collect();
        Self::with_items(config, items)
    }

    /// Build from `(id, metric)` pairs. Later duplicates of an id are ignored.
    pub fn with_items(config: LayoutConfig, items: impl IntoIterator<Item = (ItemId, f64)>) -> Self {
        let mut order = Vec::new();
        let mut states = Vec::new();
        let mut index = HashMap::new();
        for (id, metric) in items {
            if index.contains_key(&id) {
                warn!(item = %id, "duplicate item in catalog, keeping the first");
                continue;
            }
            index.insert(id.clone(), states.len());
            order.push(id.clone());
            states.push(ItemState::new(id, metric));
        }

        let mut registry = ShelfRegistry::new(config.shelf_count, config.items_per_shelf);
        registry.append_many(order.iter().cloned());

        let spacing = config.spacing(false);
        let containers = registry
            .shelves()
            .iter()
            .map(|shelf| {
                let rest = Point::new(
                    config.spatial.rest_left,
                    config.spatial.rest_top + shelf.index() as f32 * config.grid.shelf_height,
                );
                let width =
                    spacing.shelf_width(shelf.occupant_count(), config.spatial.min_shelf_width);
                ContainerState::at_rest(rest, width)
            })
            .collect();

        debug!(
            items = order.len(),
            shelves = registry.len(),
            capacity = config.items_per_shelf,
            "layout engine ready"
        );
        Self {
            config,
            registry,
            order,
            items: states,
            index,
            containers,
            widths: AnimationGroup::new(),
            gate: AnimationGate::new(),
            phase: Phase::Idle,
            transition: None,
            plan: None,
            labels: Vec::new(),
            last_capture: None,
            hook: None,
        }
    }

    // ---- accessors ----

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn registry(&self) -> &ShelfRegistry {
        &self.registry
    }

    /// Items in load order.
    pub fn items(&self) -> &[ItemState] {
        &self.items
    }

    pub fn item(&self, id: &ItemId) -> Option<&ItemState> {
        self.index.get(id).and_then(|&i| self.items.get(i))
    }

    pub fn canonical_order(&self) -> &[ItemId] {
        &self.order
    }

    pub fn containers(&self) -> &[ContainerState] {
        &self.containers
    }

    /// Labels of the current grouped layout, in rank order.
    pub fn labels(&self) -> &[GroupLabel] {
        &self.labels
    }

    /// Plan of the current grouped layout.
    pub fn plan(&self) -> Option<&LayoutPlan> {
        self.plan.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn last_capture(&self) -> Option<&CaptureRecord> {
        self.last_capture.as_ref()
    }

    /// Whether any shelf width is still tweening.
    pub fn is_resizing(&self) -> bool {
        !self.widths.is_empty()
    }

    /// Pixel projection of the current state.
    pub fn surface(&self) -> ShelfSurface<'_> {
        ShelfSurface {
            registry: &self.registry,
            containers: &self.containers,
            items: &self.items,
            index: &self.index,
            spatial: &self.config.spatial,
        }
    }

    /// Where `id` is drawn right now.
    pub fn item_box(&self, id: &ItemId) -> Option<Rect> {
        self.surface().bounding_box(id)
    }

    /// Register the callback run once per settled binary or grouped
    /// transition. Replaces any previous hook.
    pub fn on_post_layout(&mut self, hook: impl FnMut(&LayoutOutcome) + 'static) {
        self.hook = Some(Box::new(hook));
    }

    /// Replace an item's metric, e.g. after the catalog record changed.
    /// Returns `false` for unknown ids.
    pub fn set_metric(&mut self, id: &ItemId, metric: f64) -> bool {
        match self.index.get(id) {
            Some(&i) => {
                self.items[i].metric = metric;
                true
            }
            None => false,
        }
    }

    // ---- operations ----

    /// Split items into matching (odd shelves) and non-matching (even
    /// shelves), sliding the two sets of containers apart.
    pub fn apply_binary_partition(
        &mut self,
        matching: &[ItemId],
        non_matching: &[ItemId],
    ) -> Transition {
        if !self.begin(TransitionKind::Binary) {
            return Transition::Rejected;
        }
        let _span = debug_span!(
            "shelf.layout.binary",
            matching = matching.len(),
            non_matching = non_matching.len()
        )
        .entered();

        let mut seen = HashSet::new();
        let matching = self.resolve(matching, &mut seen);
        let mut non_matching = self.resolve(non_matching, &mut seen);
        let omitted = self.unassigned(&seen);
        if !omitted.is_empty() {
            warn!(
                count = omitted.len(),
                "items missing from binary partition, treating as non-matching"
            );
            non_matching.extend(omitted);
        }

        let working: Vec<ItemId> = matching.iter().chain(&non_matching).cloned().collect();
        let start = self.capture_start(&working);

        self.phase = Phase::Mutating;
        self.clear_group_layout();
        self.style_items(&matching, ItemStyle::Matching, None);
        self.style_items(&non_matching, ItemStyle::NonMatching, None);
        self.registry.reset();
        let capacity = self.config.items_per_shelf;
        let matched = self
            .registry
            .assign_group_to_shelves(&matching, capacity, Lane::Odd);
        let unmatched = self
            .registry
            .assign_group_to_shelves(&non_matching, capacity, Lane::Even);
        self.registry.refresh_visibility();
        trace!(
            matching = ?matched.shelf_indices,
            non_matching = ?unmatched.shelf_indices,
            "binary shelves assigned"
        );

        let spatial = &self.config.spatial;
        let targets: Vec<(usize, Point)> = self
            .registry
            .shelves()
            .iter()
            .map(|shelf| {
                let dx = if shelf.is_empty() {
                    0.0
                } else if shelf.index() % 2 == 0 {
                    spatial.separation_left
                } else {
                    spatial.separation_right
                };
                let rest = self.containers[shelf.index()].rest;
                (shelf.index(), rest + Point::new(dx, 0.0))
            })
            .collect();

        self.animate(TransitionKind::Binary, start, targets);
        Transition::Started
    }

    /// Lay groups out in columns, ordered by descending aggregate metric.
    pub fn apply_group_partition(&mut self, groups: &GroupMap) -> Transition {
        if !self.begin(TransitionKind::Grouped) {
            return Transition::Rejected;
        }
        let _span = debug_span!("shelf.layout.grouped", groups = groups.len()).entered();

        let mut seen = HashSet::new();
        let mut scored = Vec::with_capacity(groups.len() + 1);
        for (key, ids) in groups {
            let members = self.resolve(ids, &mut seen);
            scored.push(ScoredGroup::new(key.clone(), members, |id| self.metric_of(id)));
        }
        let omitted = self.unassigned(&seen);
        if !omitted.is_empty() {
            warn!(
                count = omitted.len(),
                group = UNKNOWN_GROUP,
                "items missing from grouping, collecting them separately"
            );
            let extra = aggregate(&omitted, |id| self.metric_of(id));
            match scored.iter_mut().find(|g| g.key == UNKNOWN_GROUP) {
                Some(group) => {
                    group.items.extend(omitted);
                    group.aggregate += extra;
                }
                None => scored.push(ScoredGroup {
                    key: UNKNOWN_GROUP.to_string(),
                    items: omitted,
                    aggregate: extra,
                }),
            }
        }

        let capacity = self.config.items_per_shelf;
        let mut plan = LayoutPlan::build_within(
            scored,
            self.config.max_groups,
            &self.config.others_key,
            capacity,
            self.registry.len(),
        );
        let working = plan.ordered_items();
        let start = self.capture_start(&working);

        self.phase = Phase::Mutating;
        self.clear_group_layout();
        self.registry.reset();
        for group in plan.groups_mut() {
            let style = if group.rank == 0 {
                ItemStyle::Highest
            } else {
                ItemStyle::Muted
            };
            self.style_items(&group.items, style, Some(group.key.as_str()));
            let run = self.registry.assign_group_capped(
                &group.items,
                capacity,
                Lane::All,
                group.shelf_limit,
            );
            for &shelf in &run.shelf_indices {
                self.registry.set_group_key(shelf, &group.key);
            }
            trace!(key = %group.key, rank = group.rank, shelves = ?run.shelf_indices, "group shelves assigned");
            group.overflowed = run.overflowed;
            group.shelf_indices = run.shelf_indices;
        }
        self.registry.hide_unclaimed();
        plan.pack(self.config.grid.shelf_height, self.config.grid.max_column_height);

        let grid = self.config.grid.clone();
        let mut targets = Vec::new();
        for group in plan.groups() {
            let x = grid.start_x + group.column as f32 * grid.column_width;
            for (row, &shelf) in group.shelf_indices.iter().enumerate() {
                let y = grid.start_y + group.row_offset + row as f32 * grid.shelf_height;
                targets.push((shelf, Point::new(x, y)));
                if let Some(container) = self.containers.get_mut(shelf) {
                    container.absolute = true;
                }
            }
            if let Some(shelf) = group.last_shelf() {
                self.labels.push(GroupLabel {
                    shelf,
                    key: group.key.clone(),
                    rank: group.rank,
                    aggregate: group.aggregate,
                    text: group.label(),
                });
            }
        }
        self.plan = Some(plan);

        self.animate(TransitionKind::Grouped, start, targets);
        Transition::Started
    }

    /// Return to the load-time layout.
    pub fn reset_layout(&mut self) -> Transition {
        if !self.begin(TransitionKind::Reset) {
            return Transition::Rejected;
        }
        let _span = debug_span!("shelf.layout.reset").entered();

        let order = self.order.clone();
        let start = self.capture_start(&order);

        self.phase = Phase::Mutating;
        self.clear_group_layout();
        for item in &mut self.items {
            item.clear_styling();
        }
        self.registry.reset();
        self.registry.append_many(order);

        let targets: Vec<(usize, Point)> = self
            .containers
            .iter()
            .enumerate()
            .map(|(shelf, container)| (shelf, container.rest))
            .collect();
        self.animate(TransitionKind::Reset, start, targets);
        Transition::Started
    }

    /// Tween every shelf's width to fit its occupants. Not gated; only
    /// widths change.
    pub fn resize_shelves_to_content(&mut self, compact: bool) {
        let spacing = self.config.spacing(compact);
        let min_width = self.config.spatial.min_shelf_width;
        let timing = self.config.animation.shelf_resize;
        for shelf in self.registry.shelves() {
            let index = shelf.index();
            let target = spacing.shelf_width(shelf.occupant_count(), min_width);
            let from = self.containers.get(index).map_or(target, |c| c.width);
            self.widths.insert(
                index,
                Tween::new(from, target, timing.duration()).easing(timing.easing),
            );
        }
        trace!(compact, shelves = self.registry.len(), "shelf widths retargeted");
    }

    /// Advance timers and tweens by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        for action in self.gate.advance(dt) {
            match action {
                GateAction::Settle(kind) => self.settle(kind),
            }
        }
        self.tick_widths(dt);
        self.tick_transition(dt);
    }

    /// Drop whatever is running and snap to the load-time layout.
    pub fn force_reset(&mut self) {
        self.gate.reset();
        self.transition = None;
        self.widths.clear();
        self.clear_group_layout();
        for item in &mut self.items {
            item.clear_styling();
            item.offset = Point::ZERO;
        }
        self.registry.reset();
        self.registry.append_many(self.order.iter().cloned());

        let spacing = self.config.spacing(false);
        let min_width = self.config.spatial.min_shelf_width;
        let counts = self.registry.occupancy();
        for (container, count) in self.containers.iter_mut().zip(counts) {
            container.position = container.rest;
            container.width = spacing.shelf_width(count, min_width);
        }
        self.phase = Phase::Idle;
        debug!("layout force reset");
    }

    // ---- transition steps ----

    fn begin(&mut self, kind: TransitionKind) -> bool {
        if !self.gate.try_acquire() {
            debug!(?kind, phase = ?self.phase, "layout busy, request dropped");
            return false;
        }
        self.phase = Phase::Capturing;
        debug!(?kind, "transition started");
        true
    }

    fn capture_start(&self, working: &[ItemId]) -> Vec<Snapshot> {
        let captured = snapshot_all(&self.surface(), working);
        if !captured.missing.is_empty() {
            debug!(
                count = captured.missing.len(),
                "items without a drawn box will not animate"
            );
        }
        captured.entries
    }

    /// Capture end positions, fake zero movement and start both tween groups.
    fn animate(&mut self, kind: TransitionKind, start: Vec<Snapshot>, targets: Vec<(usize, Point)>) {
        for item in &mut self.items {
            item.offset = Point::ZERO;
        }
        let order: Vec<ItemId> = start.iter().map(|s| s.item.clone()).collect();
        let end = snapshot_all(&self.surface(), &order);
        let start = if end.missing.is_empty() {
            start
        } else {
            start
                .into_iter()
                .filter(|s| !end.missing.contains(&s.item))
                .collect()
        };
        let end = end.entries;
        let deltas = compute_deltas(&start, &end);
        for delta in &deltas {
            if let Some(&i) = self.index.get(&delta.item) {
                self.items[i].offset = delta.offset();
            }
        }

        let timings = &self.config.animation;
        let (container_timing, item_timing, compact) = match kind {
            TransitionKind::Binary => (timings.shelf_split, timings.items_to_position, true),
            TransitionKind::Grouped => (timings.shelf_arrange, timings.items_to_position, true),
            TransitionKind::Reset => (timings.shelf_reset, timings.items_reset, false),
        };

        let shelf_delays = stagger_offsets(
            self.containers.len(),
            container_timing.stagger(),
            StaggerMode::Linear,
        );
        let containers = targets
            .into_iter()
            .filter_map(|(shelf, target)| {
                let from = self.containers.get(shelf)?.position;
                let delay = shelf_delays.get(shelf).copied().unwrap_or_default();
                Some((shelf, tween_to(from, target, delay, container_timing)))
            })
            .fold(AnimationGroup::new(), |group, (shelf, tween)| {
                group.with(shelf, tween)
            });

        let item_delays = stagger_offsets(deltas.len(), item_timing.stagger(), StaggerMode::Linear);
        let items = deltas
            .iter()
            .zip(item_delays)
            .fold(AnimationGroup::new(), |group, (delta, delay)| {
                group.with(
                    delta.item.clone(),
                    tween_to(delta.offset(), Point::ZERO, delay, item_timing),
                )
            });

        debug!(
            ?kind,
            containers = containers.len(),
            items = items.len(),
            "dual animation started"
        );
        self.last_capture = Some(CaptureRecord {
            kind,
            start,
            end,
            deltas,
        });
        self.transition = Some(ActiveTransition {
            kind,
            compact,
            containers: Callbacks::new(containers),
            items: Callbacks::new(items),
            latch: CompletionLatch::new(2),
        });
        self.phase = Phase::AnimatingDual;
    }

    fn tick_transition(&mut self, dt: Duration) {
        let Some(active) = self.transition.as_mut() else {
            return;
        };
        active.containers.tick(dt);
        active.items.tick(dt);

        for (&shelf, tween) in active.containers.inner().iter() {
            if let Some(container) = self.containers.get_mut(shelf) {
                container.position = tween.inner().current();
            }
        }
        for (id, tween) in active.items.inner().iter() {
            if let Some(&i) = self.index.get(id) {
                self.items[i].offset = tween.inner().current();
            }
        }

        let mut released = false;
        let events = active
            .containers
            .drain_events()
            .into_iter()
            .chain(active.items.drain_events());
        for event in events {
            if event == AnimationEvent::Completed {
                released |= active.latch.arrive();
            }
        }
        if released {
            let (kind, compact) = (active.kind, active.compact);
            self.transition = None;
            debug!(?kind, "dual animation complete");
            self.resize_shelves_to_content(compact);
            self.phase = Phase::Settling;
            self.gate
                .schedule(self.config.settle_delay(), GateAction::Settle(kind));
        }
    }

    fn tick_widths(&mut self, dt: Duration) {
        if self.widths.is_empty() {
            return;
        }
        self.widths.tick(dt);
        for (&shelf, tween) in self.widths.iter() {
            if let Some(container) = self.containers.get_mut(shelf) {
                container.width = tween.current();
            }
        }
        if self.widths.all_complete() {
            self.widths.clear();
        }
    }

    fn settle(&mut self, kind: TransitionKind) {
        self.gate.release();
        self.phase = Phase::Idle;
        debug!(?kind, "transition settled, gate released");
        if kind == TransitionKind::Reset {
            return;
        }
        let outcome = self.outcome(kind);
        if let Some(hook) = self.hook.as_mut() {
            hook(&outcome);
        }
    }

    fn outcome(&self, kind: TransitionKind) -> LayoutOutcome {
        match kind {
            TransitionKind::Grouped => {
                let placed = self
                    .plan
                    .iter()
                    .flat_map(|plan| plan.groups())
                    .filter(|g| !g.shelf_indices.is_empty());
                LayoutOutcome {
                    kind,
                    group_keys: placed.map(|g| g.key.clone()).collect(),
                    highest: self
                        .plan
                        .as_ref()
                        .and_then(LayoutPlan::highest)
                        .map(|g| g.key.clone()),
                }
            }
            TransitionKind::Binary | TransitionKind::Reset => LayoutOutcome {
                kind,
                group_keys: vec![MATCHING_KEY.to_string(), NON_MATCHING_KEY.to_string()],
                highest: None,
            },
        }
    }

    // ---- helpers ----

    /// Known ids not seen before, in input order.
    fn resolve(&self, ids: &[ItemId], seen: &mut HashSet<ItemId>) -> Vec<ItemId> {
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            if !self.index.contains_key(id) {
                debug!(item = %id, "unknown item, skipping");
            } else if !seen.insert(id.clone()) {
                debug!(item = %id, "item listed twice, keeping first placement");
            } else {
                resolved.push(id.clone());
            }
        }
        resolved
    }

    /// Items in load order that are not in `seen`.
    fn unassigned(&self, seen: &HashSet<ItemId>) -> Vec<ItemId> {
        self.order
            .iter()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect()
    }

    fn metric_of(&self, id: &ItemId) -> f64 {
        self.item(id).map_or(0.0, |item| item.metric)
    }

    fn style_items(&mut self, ids: &[ItemId], style: ItemStyle, group_key: Option<&str>) {
        for id in ids {
            if let Some(&i) = self.index.get(id) {
                let item = &mut self.items[i];
                item.style = style;
                item.group_key = group_key.map(str::to_string);
            }
        }
    }

    fn clear_group_layout(&mut self) {
        self.labels.clear();
        self.plan = None;
        for container in &mut self.containers {
            container.absolute = false;
        }
    }
}

fn tween_to(from: Point, to: Point, delay: Duration, timing: TweenTiming) -> Delayed<Tween<Point>> {
    Delayed::new(
        delay,
        Tween::new(from, to, timing.duration()).easing(timing.easing),
    )
}

/// Occupant count of every visible shelf, in shelf order.
pub fn visible_occupancy(registry: &ShelfRegistry) -> Vec<(usize, usize)> {
    registry
        .shelves()
        .iter()
        .filter(|s| s.is_visible())
        .map(|s| (s.index(), s.occupant_count()))
        .collect()
}
