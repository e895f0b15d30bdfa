//! Alignment snapping while dragging.
//!
//! Each axis is handled independently. The candidate position snaps to the
//! canvas origin line or to another item's leading edge (left for x, top for
//! y) when it comes within the threshold. Only leading edges participate.

use serde::{Deserialize, Serialize};

use crate::item::ItemId;
use crate::scene::Scene;

/// Orientation of a snap guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Vertical guide at an x coordinate.
    X,
    /// Horizontal guide at a y coordinate.
    Y,
}

/// A line to draw while an alignment is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    /// Which coordinate the guide marks.
    pub axis: Axis,
    /// Canvas coordinate of the line.
    pub position: f32,
}

/// Snapped position and the guides to render for this frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapOutcome {
    /// X after snapping.
    pub x: f32,
    /// Y after snapping.
    pub y: f32,
    /// At most one guide per axis.
    pub guides: Vec<Guide>,
}

/// Snap a candidate origin for `dragged` against the canvas and the other items.
///
/// When several lines are within `threshold` on the same axis the closest one
/// wins. Equal distances resolve to the line tested first: the canvas origin,
/// then other items in insertion order.
#[must_use]
pub fn snap_position(
    scene: &Scene,
    dragged: ItemId,
    x: f32,
    y: f32,
    threshold: f32,
) -> SnapOutcome {
    let others: Vec<_> = scene.items().filter(|item| item.id != dragged).collect();

    let snapped_x = snap_axis(x, others.iter().map(|item| item.transform.x), threshold);
    let snapped_y = snap_axis(y, others.iter().map(|item| item.transform.y), threshold);

    let mut guides = Vec::with_capacity(2);
    if let Some(line) = snapped_x {
        guides.push(Guide {
            axis: Axis::X,
            position: line,
        });
    }
    if let Some(line) = snapped_y {
        guides.push(Guide {
            axis: Axis::Y,
            position: line,
        });
    }

    SnapOutcome {
        x: snapped_x.unwrap_or(x),
        y: snapped_y.unwrap_or(y),
        guides,
    }
}

/// Closest line within `threshold` of `candidate`, testing the origin first.
fn snap_axis(candidate: f32, edges: impl Iterator<Item = f32>, threshold: f32) -> Option<f32> {
    let mut best: Option<(f32, f32)> = None;
    for line in std::iter::once(0.0).chain(edges) {
        let delta = (candidate - line).abs();
        if delta >= threshold {
            continue;
        }
        match best {
            Some((_, best_delta)) if best_delta <= delta => {}
            _ => best = Some((line, delta)),
        }
    }
    best.map(|(line, _)| line)
}
