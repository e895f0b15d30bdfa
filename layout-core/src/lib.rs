//! # Layout Studio Core
//!
//! Editing logic for free-form scene composition: placing images, text and
//! shapes, dragging with alignment snapping, non-destructive cropping and
//! linear undo/redo.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   Editor                    │
//! ├─────────────────────────────────────────────┤
//! │  Interaction     │  Property Commit         │
//! │  - Drag + snap   │  - One entry per edit    │
//! │  - Rect / lasso  │                          │
//! ├─────────────────────────────────────────────┤
//! │  Scene (values)  │  History (snapshots)     │
//! ├─────────────────────────────────────────────┤
//! │  Snap Engine     │  Crop Engine             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Rasterization is not done here; hosts provide a [`SceneRasterizer`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod asset;
pub mod capture;
pub mod config;
pub mod crop;
pub mod editor;
pub mod error;
pub mod event;
pub mod history;
pub mod item;
pub mod scene;
pub mod snap;

pub use asset::{Asset, AssetKind, AssetLibrary, AssetMetadata, AssetProvider, AssetSink};
pub use capture::{CaptureRequest, RasterImage, SceneRasterizer};
pub use config::{EditorConfig, Size};
pub use crop::{ClipGeometry, ClipPath, CropEdge, CropInsets, PercentPoint};
pub use editor::{CropTool, Editor, InteractionState, PropertyEdit};
pub use error::{LayoutError, LayoutResult};
pub use event::{InputEvent, KeyEvent, KeyModifiers, PointerEvent, PointerPhase};
pub use history::History;
pub use item::{ItemId, ItemKind, ItemPatch, ItemStyle, LayoutItem, ShapeKind, Transform};
pub use scene::Scene;
pub use snap::{Axis, Guide, SnapOutcome};

/// Layout core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
