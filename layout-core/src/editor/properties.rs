//! Property panel edits.
//!
//! Each edit is its own history entry, unlike a drag, which commits only on
//! release.

use serde::{Deserialize, Serialize};

use crate::item::ItemPatch;

use super::Editor;

/// A discrete change from the property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "snake_case")]
pub enum PropertyEdit {
    /// Move the top-left corner.
    Position {
        /// New x.
        x: f32,
        /// New y.
        y: f32,
    },
    /// Resize. Values are stored as given.
    Size {
        /// New width.
        width: f32,
        /// New height.
        height: f32,
    },
    /// Rotation in degrees.
    Rotation(f32),
    /// Paint order.
    ZIndex(i32),
    /// Corner rounding.
    BorderRadius(f32),
    /// Shape fill color. Ignored for images and text.
    Color(String),
    /// Text content or image source. Ignored for shapes.
    Content(String),
}

impl From<PropertyEdit> for ItemPatch {
    fn from(edit: PropertyEdit) -> Self {
        let mut patch = Self::default();
        match edit {
            PropertyEdit::Position { x, y } => {
                patch.x = Some(x);
                patch.y = Some(y);
            }
            PropertyEdit::Size { width, height } => {
                patch.width = Some(width);
                patch.height = Some(height);
            }
            PropertyEdit::Rotation(deg) => patch.rotation = Some(deg),
            PropertyEdit::ZIndex(z) => patch.z_index = Some(z),
            PropertyEdit::BorderRadius(r) => patch.border_radius = Some(r),
            PropertyEdit::Color(color) => patch.color = Some(color),
            PropertyEdit::Content(content) => patch.content = Some(content),
        }
        patch
    }
}

impl Editor {
    /// Apply an edit to the selected item and commit it immediately.
    ///
    /// Returns false without a selection or while dragging.
    pub fn apply_property(&mut self, edit: PropertyEdit) -> bool {
        if self.state.is_dragging() {
            return false;
        }
        let Some(id) = self.scene.selected() else {
            return false;
        };
        tracing::debug!("Property edit on {id}: {edit:?}");
        self.scene = self.scene.update_item(id, &edit.into());
        self.commit();
        true
    }
}
