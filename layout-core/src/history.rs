//! Undo/redo history of full scene snapshots.
//!
//! ```text
//!   snapshot    snapshot    undo        snapshot
//!   [e]         [e, a]      [e, a]      [e, b]
//!    ^              ^        ^              ^
//! ```
//!
//! Committing after an undo discards everything past the cursor: history is
//! a single line, never a tree.

use serde::{Deserialize, Serialize};

use crate::scene::Scene;

/// Linear history of scene snapshots with a cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    /// Stored snapshots. Never empty.
    entries: Vec<Scene>,
    /// Index of the snapshot matching the displayed scene.
    cursor: usize,
}

impl History {
    /// Create a history holding the empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::with_initial(Scene::new())
    }

    /// Create a history whose first entry is `scene`.
    #[must_use]
    pub fn with_initial(scene: Scene) -> Self {
        Self {
            entries: vec![scene],
            cursor: 0,
        }
    }

    /// Commit a snapshot, truncating any redo branch.
    pub fn snapshot(&mut self, scene: &Scene) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(scene.clone());
        self.cursor = self.entries.len() - 1;
        tracing::debug!(
            "History snapshot {} of {}",
            self.cursor,
            self.entries.len()
        );
    }

    /// Step back one snapshot. Returns `None` at the beginning.
    pub fn undo(&mut self) -> Option<&Scene> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one snapshot. Returns `None` at the end.
    pub fn redo(&mut self) -> Option<&Scene> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> &Scene {
        &self.entries[self.cursor]
    }

    /// Snapshot at an arbitrary index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.entries.get(index)
    }

    /// Number of stored snapshots, including the initial one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the initial snapshot is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current snapshot.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether [`undo`](Self::undo) would move the cursor.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`redo`](Self::redo) would move the cursor.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemKind, LayoutItem};

    fn scene_with(n: usize) -> Scene {
        (0..n).fold(Scene::new(), |scene, i| {
            scene
                .add_item(LayoutItem::new(ItemKind::Text {
                    content: format!("item {i}"),
                }))
                .0
        })
    }

    #[test]
    fn test_new_history_has_empty_scene() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_bounds_are_noops() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 0);

        history.snapshot(&scene_with(1));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_snapshot_after_undo_truncates() {
        let mut history = History::new();
        history.snapshot(&scene_with(1));
        history.snapshot(&scene_with(2));
        history.snapshot(&scene_with(3));

        history.undo();
        history.undo();
        assert_eq!(history.cursor(), 1);

        history.snapshot(&scene_with(5));
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert!(history.redo().is_none());
        assert_eq!(history.current().len(), 5);
    }

    #[test]
    fn test_snapshots_are_independent_copies() {
        let mut history = History::new();
        let live = scene_with(1);
        history.snapshot(&live);

        let live = live.remove_item(live.items().next().map(|i| i.id).unwrap_or_default());
        assert!(live.is_empty());
        assert_eq!(history.current().len(), 1);
    }
}
