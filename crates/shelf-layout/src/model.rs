#![forbid(unsafe_code)]

//! Identifiers and per-item state shared by the registry and the engine.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shelf_core::geometry::Point;

/// Stable identifier of one item (a film box), e.g. `film12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Group key to member ids, in first-encountered order.
pub type GroupMap = IndexMap<String, Vec<ItemId>>;

/// Visual treatment applied to an item by the active layout.
///
/// Binary styles and group styles are mutually exclusive: applying one
/// replaces the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStyle {
    /// Canonical, unfiltered layout.
    #[default]
    Neutral,
    Matching,
    NonMatching,
    /// Member of the rank-0 group.
    Highest,
    /// Member of any other group.
    Muted,
}

/// Which operation produced a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Binary,
    Grouped,
    Reset,
}

/// Engine-side record of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemState {
    pub id: ItemId,
    /// Aggregate metric contribution (e.g. box office), 0 when unknown.
    pub metric: f64,
    pub style: ItemStyle,
    pub group_key: Option<String>,
    /// Transient visual offset on top of the item's layout position.
    pub offset: Point,
}

impl ItemState {
    pub(crate) fn new(id: ItemId, metric: f64) -> Self {
        Self {
            id,
            metric,
            style: ItemStyle::Neutral,
            group_key: None,
            offset: Point::ZERO,
        }
    }

    pub(crate) fn clear_styling(&mut self) {
        self.style = ItemStyle::Neutral;
        self.group_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_round_trips_as_plain_string() {
        let id = ItemId::from("film7");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"film7\""));
        assert_eq!(id.to_string(), "film7");
    }

    #[test]
    fn clearing_styling_drops_group_key() {
        let mut item = ItemState::new("film1".into(), 10.0);
        item.style = ItemStyle::Highest;
        item.group_key = Some("female".into());
        item.clear_styling();
        assert_eq!(item.style, ItemStyle::Neutral);
        assert!(item.group_key.is_none());
    }
}
