//! Pointer-driven state machine: dragging and cropping.
//!
//! ```text
//!            pointer_down              start_crop (selected image)
//!   Dragging ◄──────────── Idle ───────────────────► CroppingRect
//!      │  ▲ pointer_move    ▲ ▲                         ▲   │
//!      │  └──────┘          │ │ apply / cancel          │   │ toggle_crop_tool
//!      └────────────────────┘ └──────────────────── CroppingLasso
//!         pointer_up (commit)
//! ```
//!
//! A background click returns to `Idle` from any state without committing.

use crate::crop::{lasso_clip, rect_clip, CropEdge, CropInsets, PercentPoint};
use crate::event::{KeyEvent, PointerEvent, PointerPhase};
use crate::item::{ItemId, ItemPatch};
use crate::snap::snap_position;

use super::Editor;

/// Crop sub-mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropTool {
    /// Edge insets.
    Rect,
    /// Freeform polygon.
    Lasso,
}

/// Transient interaction state. Never stored in history.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// An item follows the pointer.
    Dragging {
        /// Item being dragged.
        item_id: ItemId,
        /// Pointer position minus item origin at pointer-down.
        offset: (f32, f32),
    },
    /// Rectangular crop of an image.
    CroppingRect {
        /// Image being cropped.
        item_id: ItemId,
        /// Working insets.
        insets: CropInsets,
    },
    /// Lasso crop of an image.
    CroppingLasso {
        /// Image being cropped.
        item_id: ItemId,
        /// Captured points, in percent of the image's bounding box.
        points: Vec<PercentPoint>,
    },
}

impl InteractionState {
    /// No gesture in progress.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// A drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Either crop mode is active.
    #[must_use]
    pub const fn is_cropping(&self) -> bool {
        matches!(self, Self::CroppingRect { .. } | Self::CroppingLasso { .. })
    }

    /// The image being cropped, if any.
    #[must_use]
    pub const fn crop_target(&self) -> Option<ItemId> {
        match self {
            Self::CroppingRect { item_id, .. } | Self::CroppingLasso { item_id, .. } => {
                Some(*item_id)
            }
            Self::Idle | Self::Dragging { .. } => None,
        }
    }

    /// The active crop tool, if any.
    #[must_use]
    pub const fn crop_tool(&self) -> Option<CropTool> {
        match self {
            Self::CroppingRect { .. } => Some(CropTool::Rect),
            Self::CroppingLasso { .. } => Some(CropTool::Lasso),
            Self::Idle | Self::Dragging { .. } => None,
        }
    }
}

impl Editor {
    /// Start dragging `item_id` with the pointer at `(x, y)`.
    ///
    /// Only allowed from `Idle`. The item becomes selected.
    pub fn pointer_down(&mut self, item_id: ItemId, x: f32, y: f32) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        let Some(item) = self.scene.get(item_id) else {
            return false;
        };
        let offset = (x - item.transform.x, y - item.transform.y);
        self.scene = self.scene.select(Some(item_id));
        self.state = InteractionState::Dragging { item_id, offset };
        tracing::debug!("Drag start on {item_id}");
        true
    }

    /// Move the dragged item, snapping it and updating the guides.
    ///
    /// The live scene changes; history does not.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let InteractionState::Dragging { item_id, offset } = self.state else {
            return false;
        };
        let outcome = snap_position(
            &self.scene,
            item_id,
            x - offset.0,
            y - offset.1,
            self.config.snap_threshold,
        );
        self.scene = self
            .scene
            .update_item(item_id, &ItemPatch::position(outcome.x, outcome.y));
        self.guides = outcome.guides;
        true
    }

    /// Finish the drag and commit the result once.
    pub fn pointer_up(&mut self) -> bool {
        let InteractionState::Dragging { item_id, .. } = self.state else {
            return false;
        };
        self.state = InteractionState::Idle;
        self.guides.clear();
        self.commit();
        tracing::debug!("Drag end on {item_id}");
        true
    }

    /// Abort the drag and restore the last committed scene.
    pub fn cancel_drag(&mut self) -> bool {
        if !self.state.is_dragging() {
            return false;
        }
        self.state = InteractionState::Idle;
        self.guides.clear();
        self.revert_to_history();
        tracing::debug!("Drag cancelled");
        true
    }

    /// Enter rectangular crop mode for the selected image.
    pub fn start_crop(&mut self, item_id: ItemId) -> bool {
        if !self.state.is_idle() || self.scene.selected() != Some(item_id) {
            return false;
        }
        if !self
            .scene
            .get(item_id)
            .is_some_and(|item| item.kind.is_image())
        {
            return false;
        }
        self.state = InteractionState::CroppingRect {
            item_id,
            insets: CropInsets::default(),
        };
        tracing::debug!("Crop start on {item_id}");
        true
    }

    /// Switch between rect and lasso. Work in the previous mode is discarded.
    pub fn toggle_crop_tool(&mut self) -> bool {
        self.state = match self.state {
            InteractionState::CroppingRect { item_id, .. } => InteractionState::CroppingLasso {
                item_id,
                points: Vec::new(),
            },
            InteractionState::CroppingLasso { item_id, .. } => InteractionState::CroppingRect {
                item_id,
                insets: CropInsets::default(),
            },
            InteractionState::Idle | InteractionState::Dragging { .. } => return false,
        };
        true
    }

    /// Set one rect inset (clamped to `[0, 50]` percent).
    pub fn set_crop_inset(&mut self, edge: CropEdge, value: f32) -> bool {
        let InteractionState::CroppingRect { insets, .. } = &mut self.state else {
            return false;
        };
        insets.set(edge, value);
        true
    }

    /// Record a lasso point at the canvas position `(x, y)`.
    pub fn crop_click(&mut self, x: f32, y: f32) -> bool {
        let InteractionState::CroppingLasso { item_id, points } = &mut self.state else {
            return false;
        };
        let Some(item) = self.scene.get(*item_id) else {
            return false;
        };
        points.push(PercentPoint::from_canvas(&item.transform, x, y));
        true
    }

    /// Apply the working crop and return to `Idle`.
    ///
    /// Returns true when a clip region was stored and committed. A lasso
    /// with fewer than three points leaves the item untouched but still
    /// exits crop mode.
    pub fn apply_crop(&mut self) -> bool {
        let clip = match std::mem::take(&mut self.state) {
            InteractionState::CroppingRect { item_id, insets } => {
                Some((item_id, rect_clip(insets)))
            }
            InteractionState::CroppingLasso { item_id, points } => {
                let clip = lasso_clip(&points).map(|clip| (item_id, clip));
                if clip.is_none() {
                    tracing::debug!(
                        "Lasso crop with {} points discarded on {item_id}",
                        points.len()
                    );
                }
                clip
            }
            other => {
                self.state = other;
                return false;
            }
        };

        let Some((item_id, clip)) = clip else {
            return false;
        };
        tracing::debug!("Applied crop {clip} to {item_id}");
        self.scene = self.scene.update_item(item_id, &ItemPatch::clip(clip));
        self.commit();
        true
    }

    /// Leave crop mode without changing the item.
    pub fn cancel_crop(&mut self) -> bool {
        if !self.state.is_cropping() {
            return false;
        }
        self.state = InteractionState::Idle;
        true
    }

    /// Click on empty canvas: clear the selection and return to `Idle`.
    ///
    /// Nothing is committed. A drag in progress is abandoned.
    pub fn background_click(&mut self) {
        if self.state.is_dragging() {
            self.revert_to_history();
        }
        self.state = InteractionState::Idle;
        self.guides.clear();
        self.scene = self.scene.select(None);
    }

    /// Route a pointer event onto the state machine.
    ///
    /// Events without a target are hit-tested against the live scene.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Down => {
                let target = event
                    .target
                    .or_else(|| self.scene.item_at(event.x, event.y));
                let Some(id) = target else {
                    self.background_click();
                    return;
                };
                if self.state.is_idle() {
                    self.pointer_down(id, event.x, event.y);
                } else if self.state.crop_tool() == Some(CropTool::Lasso)
                    && self.state.crop_target() == Some(id)
                {
                    self.crop_click(event.x, event.y);
                }
            }
            PointerPhase::Move => {
                self.pointer_move(event.x, event.y);
            }
            PointerPhase::Up => {
                self.pointer_up();
            }
            PointerPhase::Cancel => {
                self.cancel_drag();
            }
        }
    }

    /// Route a key press onto editing commands.
    ///
    /// Keys are ignored while dragging.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        if !event.pressed || self.state.is_dragging() {
            return;
        }
        let mods = event.modifiers;
        match event.key.as_str() {
            "z" | "Z" if mods.command() && mods.shift => {
                self.redo();
            }
            "z" | "Z" if mods.command() => {
                self.undo();
            }
            "y" | "Y" if mods.command() => {
                self.redo();
            }
            "Delete" | "Backspace" if !self.state.is_cropping() => {
                self.delete_selected();
            }
            "Escape" => {
                self.cancel_crop();
            }
            "Enter" => {
                self.apply_crop();
            }
            _ => {}
        }
    }
}
