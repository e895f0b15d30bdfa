//! The editing session.
//!
//! An [`Editor`] owns the live [`Scene`], its [`History`], the transient
//! interaction state and the session [`EditorConfig`]. Every input is handled
//! synchronously; nothing here blocks or spawns.
//!
//! ```text
//!  pointer / keys ──► interaction ──┐
//!                                   ├──► live Scene ──(commit)──► History
//!  property panel ──► properties ───┘
//! ```

mod assets;
mod interaction;
mod properties;

pub use interaction::{CropTool, InteractionState};
pub use properties::PropertyEdit;

use crate::config::EditorConfig;
use crate::event::InputEvent;
use crate::history::History;
use crate::item::{ItemId, ItemKind, LayoutItem, ShapeKind, Transform};
use crate::scene::Scene;
use crate::snap::Guide;

/// A single editing session.
#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    /// The scene being displayed. Diverges from `history.current()` only
    /// while a drag or selection change is pending commit.
    scene: Scene,
    history: History,
    state: InteractionState,
    /// Guides for the current drag frame.
    guides: Vec<Guide>,
}

impl Editor {
    /// Create an editor with an empty scene.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            scene: Scene::new(),
            history: History::new(),
            state: InteractionState::Idle,
            guides: Vec::new(),
        }
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The live scene.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The undo/redo history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Current interaction state.
    #[must_use]
    pub const fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Snap guides to render for the current frame.
    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// Store the live scene as a new history entry.
    fn commit(&mut self) {
        self.history.snapshot(&self.scene);
    }

    /// Throw away uncommitted changes to the live scene.
    fn revert_to_history(&mut self) {
        self.scene = self.history.current().clone();
    }

    /// Dispatch an input event to the pointer or keyboard handler.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer),
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    /// Add an item and commit. Returns the assigned ID.
    ///
    /// Returns `None` while dragging: the live scene holds an uncommitted
    /// drag position that must only reach history on pointer-up.
    pub fn add_item(&mut self, item: LayoutItem) -> Option<ItemId> {
        if self.state.is_dragging() {
            tracing::debug!("Add ignored during drag");
            return None;
        }
        let (scene, id) = self.scene.add_item(item);
        self.scene = scene;
        self.commit();
        tracing::debug!("Added item {id}");
        Some(id)
    }

    /// Add a shape with the configured default geometry and color.
    ///
    /// Returns `None` while dragging.
    pub fn add_shape(&mut self, shape: ShapeKind) -> Option<ItemId> {
        let (x, y) = self.config.spawn_origin;
        let size = self.config.shape_size;
        let border_radius = if shape == ShapeKind::Circle {
            self.config.default_circle_radius
        } else {
            0.0
        };
        let item = LayoutItem::new(ItemKind::Shape {
            shape,
            color: self.config.default_shape_color.clone(),
        })
        .with_transform(Transform {
            x,
            y,
            width: size.width,
            height: size.height,
            ..Transform::default()
        })
        .with_border_radius(border_radius);
        self.add_item(item)
    }

    /// Delete the selected item and commit.
    ///
    /// Returns false (and does nothing) without a selection or mid-gesture.
    pub fn delete_selected(&mut self) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        let Some(id) = self.scene.selected() else {
            return false;
        };
        self.scene = self.scene.remove_item(id);
        self.commit();
        tracing::debug!("Deleted item {id}");
        true
    }

    /// Step back one history entry. Exits crop mode; ignored while dragging.
    pub fn undo(&mut self) -> bool {
        if self.state.is_dragging() {
            return false;
        }
        self.state = InteractionState::Idle;
        match self.history.undo() {
            Some(scene) => {
                self.scene = scene.clone();
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry. Exits crop mode; ignored while dragging.
    pub fn redo(&mut self) -> bool {
        if self.state.is_dragging() {
            return false;
        }
        self.state = InteractionState::Idle;
        match self.history.redo() {
            Some(scene) => {
                self.scene = scene.clone();
                true
            }
            None => false,
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
