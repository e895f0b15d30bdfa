//! Layout items - the elements placed on the canvas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crop::ClipPath;

/// Unique identifier for a layout item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Create a new unique item ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vector shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Filled rectangle.
    Rectangle,
    /// Ellipse inscribed in the bounding box (rounded by `border_radius` percent).
    Circle,
    /// Horizontal line through the middle of the bounding box.
    Line,
}

/// The content an item carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ItemKind {
    /// A raster image.
    Image {
        /// Image source URI or data URI.
        src: String,
    },

    /// A text box.
    Text {
        /// Text content.
        content: String,
    },

    /// A vector shape.
    Shape {
        /// Which shape to draw.
        shape: ShapeKind,
        /// Fill color as a CSS color string.
        color: String,
    },
}

impl ItemKind {
    /// Whether this is an image item (the only kind that can be cropped).
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// Position, size, rotation and paint order of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// X position of the top-left corner (canvas units).
    pub x: f32,
    /// Y position of the top-left corner (canvas units).
    pub y: f32,
    /// Width in canvas units.
    pub width: f32,
    /// Height in canvas units.
    pub height: f32,
    /// Rotation in degrees, clockwise, around the center.
    pub rotation: f32,
    /// Paint order. Not unique; ties are painted in insertion order.
    pub z_index: i32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            z_index: 0,
        }
    }
}

impl Transform {
    /// Center point of the bounding box.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Map a canvas point into the unrotated frame of this transform.
    ///
    /// Undoes the rotation about the center, so the result can be compared
    /// against the axis-aligned box `x..x + width`, `y..y + height`.
    #[must_use]
    pub fn to_local(&self, x: f32, y: f32) -> (f32, f32) {
        if self.rotation.abs() < f32::EPSILON {
            return (x, y);
        }
        let (cx, cy) = self.center();
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let (dx, dy) = (x - cx, y - cy);
        (
            cx + dx.mul_add(cos, dy * sin),
            cy + dy.mul_add(cos, -(dx * sin)),
        )
    }
}

/// Display-time overrides applied on top of an item.
///
/// Only the crop clip region is currently meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStyle {
    /// Visible region of the item. Each crop replaces the previous one.
    pub clip_path: Option<ClipPath>,
}

/// A placed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem {
    /// Unique identifier.
    pub id: ItemId,
    /// Item content.
    pub kind: ItemKind,
    /// Geometry and paint order.
    pub transform: Transform,
    /// Corner rounding: pixels for images and text, percent for circles.
    pub border_radius: f32,
    /// Display overrides.
    pub style: ItemStyle,
}

impl LayoutItem {
    /// Create a new item with the given kind and default geometry.
    #[must_use]
    pub fn new(kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            kind,
            transform: Transform::default(),
            border_radius: 0.0,
            style: ItemStyle::default(),
        }
    }

    /// Set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the border radius.
    #[must_use]
    pub fn with_border_radius(mut self, border_radius: f32) -> Self {
        self.border_radius = border_radius;
        self
    }

    /// Check if a point (in canvas coordinates) is within this item's
    /// bounding box, taking rotation into account.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let t = &self.transform;
        let (x, y) = t.to_local(x, y);
        x >= t.x && x <= t.x + t.width && y >= t.y && y <= t.y + t.height
    }

    /// Apply a partial update in place.
    ///
    /// Fields that do not apply to this item's kind are ignored.
    pub fn apply_patch(&mut self, patch: &ItemPatch) {
        let t = &mut self.transform;
        if let Some(x) = patch.x {
            t.x = x;
        }
        if let Some(y) = patch.y {
            t.y = y;
        }
        if let Some(width) = patch.width {
            t.width = width;
        }
        if let Some(height) = patch.height {
            t.height = height;
        }
        if let Some(rotation) = patch.rotation {
            t.rotation = rotation;
        }
        if let Some(z_index) = patch.z_index {
            t.z_index = z_index;
        }
        if let Some(radius) = patch.border_radius {
            self.border_radius = radius;
        }
        if let Some(style) = &patch.style {
            self.style = style.clone();
        }

        match (&mut self.kind, &patch.content, &patch.color) {
            (ItemKind::Image { src }, Some(content), _) => src.clone_from(content),
            (ItemKind::Text { content }, Some(new_content), _) => content.clone_from(new_content),
            (ItemKind::Shape { color, .. }, _, Some(new_color)) => color.clone_from(new_color),
            _ => {}
        }
    }
}

/// A partial update to a [`LayoutItem`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    /// New x position.
    pub x: Option<f32>,
    /// New y position.
    pub y: Option<f32>,
    /// New width.
    pub width: Option<f32>,
    /// New height.
    pub height: Option<f32>,
    /// New rotation in degrees.
    pub rotation: Option<f32>,
    /// New paint order.
    pub z_index: Option<i32>,
    /// New corner rounding.
    pub border_radius: Option<f32>,
    /// New image source or text content.
    pub content: Option<String>,
    /// New shape fill color.
    pub color: Option<String>,
    /// Replacement style overlay.
    pub style: Option<ItemStyle>,
}

impl ItemPatch {
    /// Patch that moves an item.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that replaces the clip region.
    #[must_use]
    pub fn clip(clip_path: ClipPath) -> Self {
        Self {
            style: Some(ItemStyle {
                clip_path: Some(clip_path),
            }),
            ..Self::default()
        }
    }
}
