//! Scene capture seam.
//!
//! The core never rasterizes. It prepares the scene and hands it to a
//! [`SceneRasterizer`] implementation owned by the host.

use crate::error::LayoutResult;
use crate::scene::Scene;

/// What region to capture and how.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRequest {
    /// Width of the visible canvas region in canvas units.
    pub width: f32,
    /// Height of the visible canvas region in canvas units.
    pub height: f32,
    /// Background fill (RGBA).
    pub background: [u8; 4],
    /// Supersampling factor applied to the output size.
    pub scale: f32,
}

/// An encoded raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// MIME type of `data`, e.g. `image/png`.
    pub mime_type: String,
    /// Encoded bytes.
    pub data: Vec<u8>,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl RasterImage {
    /// Encode as a `data:` URI suitable for an image item source.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{encoded}", self.mime_type)
    }
}

/// Produces an encoded image of a scene.
pub trait SceneRasterizer {
    /// Rasterize `scene` according to `request`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Capture`](crate::LayoutError::Capture) if the
    /// scene cannot be rendered or encoded.
    fn rasterize(&self, scene: &Scene, request: &CaptureRequest) -> LayoutResult<RasterImage>;
}
