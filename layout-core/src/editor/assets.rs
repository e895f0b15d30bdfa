//! Placing library assets and capturing the scene.

use crate::asset::{Asset, AssetKind, AssetSink, SAVED_LAYOUT_PROMPT};
use crate::capture::{CaptureRequest, RasterImage, SceneRasterizer};
use crate::item::{ItemId, ItemKind, LayoutItem, Transform};
use crate::scene::Scene;

use super::Editor;

impl Editor {
    /// Place an asset on the canvas with kind-dependent default geometry.
    ///
    /// Returns `None` for assets that cannot become items (video), or while
    /// dragging.
    pub fn place_asset(&mut self, asset: &Asset) -> Option<ItemId> {
        let (kind, size) = match asset.kind {
            AssetKind::Image => (
                ItemKind::Image {
                    src: asset.content.clone(),
                },
                self.config.image_size,
            ),
            AssetKind::Text => (
                ItemKind::Text {
                    content: asset.content.clone(),
                },
                self.config.text_size,
            ),
            AssetKind::Video => {
                tracing::debug!("Video asset {} is not placeable", asset.id);
                return None;
            }
        };
        let (x, y) = self.config.spawn_origin;
        let item = LayoutItem::new(kind).with_transform(Transform {
            x,
            y,
            width: size.width,
            height: size.height,
            ..Transform::default()
        });
        self.add_item(item)
    }

    /// The scene as it should appear in a capture: no selection.
    #[must_use]
    pub fn capture_scene(&self) -> Scene {
        self.scene.select(None)
    }

    /// Capture region and quality from the session configuration.
    #[must_use]
    pub fn capture_request(&self) -> CaptureRequest {
        CaptureRequest {
            width: self.config.canvas_width,
            height: self.config.canvas_height,
            background: self.config.capture_background,
            scale: self.config.capture_scale,
        }
    }

    /// Rasterize the scene for download.
    ///
    /// Returns `None` if the rasterizer fails; the editor is unchanged either way.
    pub fn export_image<R: SceneRasterizer + ?Sized>(&self, rasterizer: &R) -> Option<RasterImage> {
        match rasterizer.rasterize(&self.capture_scene(), &self.capture_request()) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("Scene capture failed: {e}");
                None
            }
        }
    }

    /// Rasterize the scene and hand it to `sink` as a new image asset.
    ///
    /// Returns the created asset, or `None` if the rasterizer failed.
    pub fn save_layout_asset<R, S>(&self, rasterizer: &R, sink: &mut S) -> Option<Asset>
    where
        R: SceneRasterizer + ?Sized,
        S: AssetSink + ?Sized,
    {
        let image = self.export_image(rasterizer)?;
        let asset =
            Asset::new(AssetKind::Image, image.to_data_uri()).with_prompt(SAVED_LAYOUT_PROMPT);
        tracing::info!("Saved layout as asset {}", asset.id);
        sink.on_asset_created(asset.clone());
        Some(asset)
    }
}
