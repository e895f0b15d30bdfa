//! Crop geometry: rectangular insets and freeform lasso polygons.
//!
//! Both modes produce a single [`ClipPath`] stored in an item's style. The
//! underlying image is never modified, so applying a crop is fully reversible
//! through history and a later crop replaces the earlier one outright.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::Transform;

/// Largest inset allowed on any edge, in percent of the bounding box.
pub const MAX_INSET: f32 = 50.0;

/// Minimum number of lasso points that form a polygon.
pub const MIN_LASSO_POINTS: usize = 3;

/// One edge of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropEdge {
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
}

/// How much of each edge is cut away, in percent of the item's size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropInsets {
    /// Percent removed from the top.
    pub top: f32,
    /// Percent removed from the right.
    pub right: f32,
    /// Percent removed from the bottom.
    pub bottom: f32,
    /// Percent removed from the left.
    pub left: f32,
}

impl CropInsets {
    /// Insets with every edge set to `value` (clamped).
    #[must_use]
    pub fn uniform(value: f32) -> Self {
        let v = clamp_inset(value);
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Set one edge, clamped to `[0, MAX_INSET]`.
    pub fn set(&mut self, edge: CropEdge, value: f32) {
        let v = clamp_inset(value);
        match edge {
            CropEdge::Top => self.top = v,
            CropEdge::Right => self.right = v,
            CropEdge::Bottom => self.bottom = v,
            CropEdge::Left => self.left = v,
        }
    }

    /// Read one edge.
    #[must_use]
    pub const fn get(&self, edge: CropEdge) -> f32 {
        match edge {
            CropEdge::Top => self.top,
            CropEdge::Right => self.right,
            CropEdge::Bottom => self.bottom,
            CropEdge::Left => self.left,
        }
    }
}

fn clamp_inset(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, MAX_INSET)
}

/// A point relative to an item's bounding box, in percent (0-100 on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentPoint {
    /// Horizontal position in percent of the width.
    pub x: f32,
    /// Vertical position in percent of the height.
    pub y: f32,
}

impl PercentPoint {
    /// Create a point from raw percentages.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert a canvas-space pointer position into percent of the item's
    /// bounding box, clamped to the box.
    ///
    /// The item's rotation is undone first, so the point lands where it was
    /// clicked once the clip is drawn inside the rotated item.
    #[must_use]
    pub fn from_canvas(transform: &Transform, x: f32, y: f32) -> Self {
        let (x, y) = transform.to_local(x, y);
        Self {
            x: to_percent(x - transform.x, transform.width),
            y: to_percent(y - transform.y, transform.height),
        }
    }
}

fn to_percent(offset: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    (offset / extent * 100.0).clamp(0.0, 100.0)
}

/// The stored clip-region descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "data", rename_all = "lowercase")]
pub enum ClipPath {
    /// Keep the rectangle left after removing the insets.
    Inset(CropInsets),
    /// Keep the region inside the polygon.
    Polygon(Vec<PercentPoint>),
}

impl fmt::Display for ClipPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inset(i) => write!(
                f,
                "inset({}% {}% {}% {}%)",
                i.top, i.right, i.bottom, i.left
            ),
            Self::Polygon(points) => {
                f.write_str("polygon(")?;
                for (idx, p) in points.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}% {}%", p.x, p.y)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A clip region resolved into canvas coordinates, before rotation.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipGeometry {
    /// Axis-aligned rectangle.
    Rect {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
    },
    /// Closed polygon.
    Polygon(Vec<(f32, f32)>),
}

impl ClipPath {
    /// Resolve the descriptor against an item's bounding box.
    #[must_use]
    pub fn resolve(&self, t: &Transform) -> ClipGeometry {
        match self {
            Self::Inset(i) => {
                let x = t.x + t.width * i.left / 100.0;
                let y = t.y + t.height * i.top / 100.0;
                ClipGeometry::Rect {
                    x,
                    y,
                    width: t.width * (100.0 - i.left - i.right) / 100.0,
                    height: t.height * (100.0 - i.top - i.bottom) / 100.0,
                }
            }
            Self::Polygon(points) => ClipGeometry::Polygon(
                points
                    .iter()
                    .map(|p| (t.x + t.width * p.x / 100.0, t.y + t.height * p.y / 100.0))
                    .collect(),
            ),
        }
    }
}

/// Build the clip region for a rectangular crop.
#[must_use]
pub fn rect_clip(insets: CropInsets) -> ClipPath {
    ClipPath::Inset(insets)
}

/// Build the clip region for a lasso crop.
///
/// Returns `None` when fewer than [`MIN_LASSO_POINTS`] points were captured.
/// Points are used as given: no simplification or self-intersection checks.
#[must_use]
pub fn lasso_clip(points: &[PercentPoint]) -> Option<ClipPath> {
    if points.len() < MIN_LASSO_POINTS {
        return None;
    }
    Some(ClipPath::Polygon(points.to_vec()))
}
