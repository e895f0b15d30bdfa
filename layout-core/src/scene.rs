//! Scene model: the placed items and the current selection.
//!
//! A [`Scene`] is a value. Every editing operation returns a new scene and
//! leaves the receiver untouched, so history snapshots can never be altered
//! by later edits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::item::{ItemId, ItemPatch, LayoutItem};

/// All items on the canvas plus the selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// All items, indexed by ID.
    items: HashMap<ItemId, LayoutItem>,
    /// Item IDs in insertion order.
    order: Vec<ItemId>,
    /// Currently selected item.
    selected: Option<ItemId>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item with a fresh ID on top of the paint order.
    ///
    /// The item's own ID and z-index are replaced: the ID with a new one,
    /// the z-index with `count + 1`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn add_item(&self, mut item: LayoutItem) -> (Self, ItemId) {
        let id = ItemId::new();
        item.id = id;
        item.transform.z_index = self.order.len() as i32 + 1;

        let mut next = self.clone();
        next.order.push(id);
        next.items.insert(id, item);
        (next, id)
    }

    /// Remove an item, clearing the selection if it was selected.
    #[must_use]
    pub fn remove_item(&self, id: ItemId) -> Self {
        let mut next = self.clone();
        if next.items.remove(&id).is_some() {
            next.order.retain(|&eid| eid != id);
            if next.selected == Some(id) {
                next.selected = None;
            }
        }
        next
    }

    /// Apply a partial update to one item. Unknown IDs leave the scene unchanged.
    #[must_use]
    pub fn update_item(&self, id: ItemId, patch: &ItemPatch) -> Self {
        let mut next = self.clone();
        if let Some(item) = next.items.get_mut(&id) {
            item.apply_patch(patch);
        }
        next
    }

    /// Select an item, or clear the selection with `None`.
    ///
    /// Selecting an ID that is not in the scene leaves the selection unchanged.
    #[must_use]
    pub fn select(&self, id: Option<ItemId>) -> Self {
        let mut next = self.clone();
        match id {
            Some(id) if !next.items.contains_key(&id) => {}
            other => next.selected = other,
        }
        next
    }

    /// Get an item by ID.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&LayoutItem> {
        self.items.get(&id)
    }

    /// Whether the scene contains an item.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &LayoutItem> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Items in paint order: ascending z-index, ties in insertion order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&LayoutItem> {
        let mut items: Vec<_> = self.items().collect();
        // Stable sort keeps insertion order among equal z-indices.
        items.sort_by_key(|item| item.transform.z_index);
        items
    }

    /// Find the topmost item whose bounding box contains the point.
    #[must_use]
    pub fn item_at(&self, x: f32, y: f32) -> Option<ItemId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|item| item.contains_point(x, y))
            .map(|item| item.id)
    }

    /// The selected item ID.
    #[must_use]
    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    /// The selected item.
    #[must_use]
    pub fn selected_item(&self) -> Option<&LayoutItem> {
        self.selected.and_then(|id| self.items.get(&id))
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
