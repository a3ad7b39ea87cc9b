#![forbid(unsafe_code)]

//! Pixel projection of the in-memory shelf model.
//!
//! Nothing here is stored: an item's box is derived from its shelf's
//! container, its slot on that shelf and its transient visual offset. Reading
//! a box right after a membership change therefore sees the new layout with
//! no reflow in between.
//!
//! ```text
//! item.left = container.x + slot_inset_x + position * slot_width + offset.x
//! item.top  = container.y + slot_inset_y                         + offset.y
//! ```

use std::collections::HashMap;

use shelf_core::geometry::{Point, Rect};

use crate::capture::Surface;
use crate::config::SpatialConfig;
use crate::model::{ItemId, ItemState};
use crate::registry::ShelfRegistry;

/// Drawn state of one shelf container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerState {
    /// Where the container sits in the canonical layout.
    pub rest: Point,
    /// Where it is drawn now.
    pub position: Point,
    pub width: f32,
    /// Placed by a grouped layout rather than offset from rest.
    pub absolute: bool,
}

impl ContainerState {
    pub fn at_rest(rest: Point, width: f32) -> Self {
        Self {
            rest,
            position: rest,
            width,
            absolute: false,
        }
    }

    /// Displacement from the rest position.
    pub fn offset(&self) -> Point {
        self.position - self.rest
    }
}

/// Read-only view that answers [`Surface`] queries from the model.
#[derive(Debug, Clone, Copy)]
pub struct ShelfSurface<'a> {
    pub(crate) registry: &'a ShelfRegistry,
    pub(crate) containers: &'a [ContainerState],
    pub(crate) items: &'a [ItemState],
    pub(crate) index: &'a HashMap<ItemId, usize>,
    pub(crate) spatial: &'a SpatialConfig,
}

impl ShelfSurface<'_> {
    /// Box of slot `position` on `shelf`, ignoring any item offset.
    pub fn slot_box(&self, shelf: usize, position: usize) -> Option<Rect> {
        let container = self.containers.get(shelf)?;
        let origin = container.position
            + Point::new(
                self.spatial.slot_inset_x + position as f32 * self.spatial.slot_width,
                self.spatial.slot_inset_y,
            );
        Some(Rect::at(
            origin,
            self.spatial.item_width,
            self.spatial.item_height,
        ))
    }
}

impl Surface for ShelfSurface<'_> {
    fn bounding_box(&self, id: &ItemId) -> Option<Rect> {
        let slot = self.registry.position_of(id)?;
        let offset = self
            .index
            .get(id)
            .and_then(|&i| self.items.get(i))
            .map_or(Point::ZERO, |item| item.offset);
        self.slot_box(slot.shelf, slot.position)
            .map(|rect| rect.translate(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_follows_container_slot_and_offset() {
        let spatial = SpatialConfig::default();
        let mut registry = ShelfRegistry::new(2, 2);
        let ids: Vec<ItemId> = ["a", "b", "c"].into_iter().map(ItemId::from).collect();
        registry.append_many(ids.clone());

        let containers = vec![
            ContainerState::at_rest(Point::new(340.0, 70.0), 300.0),
            ContainerState::at_rest(Point::new(340.0, 200.0), 300.0),
        ];
        let mut items: Vec<ItemState> = ids.iter().map(|id| ItemState::new(id.clone(), 0.0)).collect();
        items[1].offset = Point::new(10.0, -5.0);
        let index: HashMap<ItemId, usize> =
            ids.iter().cloned().enumerate().map(|(i, id)| (id, i)).collect();

        let surface = ShelfSurface {
            registry: &registry,
            containers: &containers,
            items: &items,
            index: &index,
            spatial: &spatial,
        };

        let a = surface.bounding_box(&ids[0]);
        assert_eq!(a.map(|r| (r.left(), r.top())), Some((370.0, 82.0)));
        let b = surface.bounding_box(&ids[1]);
        assert_eq!(b.map(|r| (r.left(), r.top())), Some((455.0, 77.0)));
        let c = surface.bounding_box(&ids[2]);
        assert_eq!(c.map(|r| (r.left(), r.top())), Some((370.0, 212.0)));
        assert!(surface.bounding_box(&ItemId::from("zz")).is_none());
    }

    #[test]
    fn container_offset_is_relative_to_rest() {
        let mut container = ContainerState::at_rest(Point::new(340.0, 70.0), 180.0);
        container.position.x -= 505.0;
        assert_eq!(container.offset(), Point::new(-505.0, 0.0));
    }
}
