//! # Layout Studio Renderer
//!
//! Scene rasterizer for the layout core, plus local image import.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌─────────────┐    ┌──────────┐
//! │  Scene   │───►│ SVG (clip,│───►│ usvg/resvg  │───►│ PNG/JPEG │
//! │          │    │  rotate)  │    │ tiny-skia   │    │          │
//! └──────────┘    └───────────┘    └─────────────┘    └──────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod image;

pub use crate::image::{import_image_bytes, import_local_image, ImageFormat, ImageInfo};
pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat, SceneExporter};
