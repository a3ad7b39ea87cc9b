#![forbid(unsafe_code)]

//! Shelf layout and regrouping engine.
//!
//! Given a partition of items into groups, this crate decides which shelf
//! holds which item, where each shelf container goes and how wide it is, then
//! animates from the current picture to the new one without a visible jump.
//!
//! - [`LayoutEngine`] - the four layout operations and the `tick` loop
//! - [`ShelfRegistry`] - fixed shelves and their membership
//! - [`AnimationGate`] - one transition at a time, drop semantics
//! - [`capture`] - FLIP snapshots and deltas
//! - [`plan`] - consolidation, ranking and column packing of groups
//! - [`LayoutConfig`] - timings and spatial constants
//!
//! # Example
//!
//! ```ignore
//! use shelf_layout::{GroupMap, LayoutConfig, LayoutEngine};
//!
//! let mut engine = LayoutEngine::new(LayoutConfig::default(), &catalog);
//! let mut groups = GroupMap::new();
//! groups.insert("female".into(), female_ids);
//! groups.insert("male".into(), male_ids);
//! let _ = engine.apply_group_partition(&groups);
//! while !engine.is_idle() {
//!     engine.tick(frame_time);
//! }
//! ```

pub mod capture;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod gate;
pub mod model;
pub mod plan;
pub mod registry;
pub mod surface;

pub use capture::{Delta, Snapshot, SnapshotSet, Surface, compute_deltas, snapshot_all};
pub use catalog::{FilterDescriptor, ItemCatalog, value_at_path};
pub use config::{ConfigError, LayoutConfig, LayoutConfigParse};
pub use engine::{
    CaptureRecord, GroupLabel, LayoutEngine, LayoutOutcome, Phase, PostLayoutHook, Transition,
    UNKNOWN_GROUP,
};
pub use gate::{AnimationGate, TimerHandle};
pub use model::{GroupMap, ItemId, ItemState, ItemStyle, TransitionKind};
pub use plan::{LayoutPlan, PlannedGroup};
pub use registry::{Lane, Shelf, ShelfRegistry, ShelfRun, Slot};
pub use shelf_core::geometry::{Point, Rect};
pub use surface::{ContainerState, ShelfSurface};
