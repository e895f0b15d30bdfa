//! Scene export to image formats.
//!
//! Renders a [`Scene`] to PNG, JPEG, or SVG using an SVG intermediate
//! representation and the resvg/tiny-skia rasterization pipeline. Items are
//! drawn in paint order, rotated about their centers, and clipped to their
//! crop region.

use std::fmt::Write;

use ::image::ImageEncoder;
use layout_core::{
    CaptureRequest, ClipGeometry, ItemKind, LayoutItem, LayoutResult, RasterImage, Scene,
    SceneRasterizer, ShapeKind,
};

use crate::error::{RenderError, RenderResult};

/// Font size used for text items.
const TEXT_FONT_SIZE: f32 = 16.0;

/// Stroke width used for line shapes.
const LINE_STROKE_WIDTH: f32 = 4.0;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector graphics (returns the SVG XML string as UTF-8 bytes).
    Svg,
}

/// Configuration for scene export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Canvas width in canvas units.
    pub width: u32,
    /// Canvas height in canvas units.
    pub height: u32,
    /// Background color as RGBA bytes.
    pub background: [u8; 4],
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
    /// Scale factor (e.g. 2.0 for retina).
    pub scale: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            background: [255, 255, 255, 255],
            jpeg_quality: 85,
            scale: 1.0,
        }
    }
}

impl ExportConfig {
    /// Build an export configuration from a capture request.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_request(request: &CaptureRequest) -> Self {
        Self {
            width: request.width.max(1.0).round() as u32,
            height: request.height.max(1.0).round() as u32,
            background: request.background,
            scale: request.scale,
            ..Self::default()
        }
    }
}

/// Exports a [`Scene`] to various image formats.
pub struct SceneExporter {
    config: ExportConfig,
}

impl SceneExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export a scene to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be rendered or encoded.
    pub fn export(&self, scene: &Scene, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Png => self.render_to_png(scene),
            ExportFormat::Jpeg => self.render_to_jpeg(scene),
            ExportFormat::Svg => Ok(self.render_to_svg(scene).into_bytes()),
        }
    }

    /// Export the scene to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn render_to_png(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let pixmap = Self::rasterize_svg(&self.render_to_svg(scene))?;

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Export the scene to JPEG bytes, flattening alpha onto the background.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_to_jpeg(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let pixmap = Self::rasterize_svg(&self.render_to_svg(scene))?;

        let (width, height) = (pixmap.width(), pixmap.height());
        let bg = &self.config.background;
        let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
        // tiny-skia stores premultiplied RGBA.
        for pixel in pixmap.data().chunks_exact(4) {
            let inv = 1.0 - f32::from(pixel[3]) / 255.0;
            for channel in 0..3 {
                let value = f32::from(bg[channel]).mul_add(inv, f32::from(pixel[channel]));
                rgb_data.push(value.clamp(0.0, 255.0) as u8);
            }
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        let encoder = ::image::codecs::jpeg::JpegEncoder::new_with_quality(
            &mut buf,
            self.config.jpeg_quality,
        );
        encoder
            .write_image(&rgb_data, width, height, ::image::ColorType::Rgb8.into())
            .map_err(|e| RenderError::Export(format!("JPEG encoding failed: {e}")))?;

        Ok(buf.into_inner())
    }

    /// Export the scene to an SVG string.
    #[must_use]
    pub fn render_to_svg(&self, scene: &Scene) -> String {
        let (out_w, out_h) = self.output_dimensions();
        let view_w = self.config.width.max(1);
        let view_h = self.config.height.max(1);

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {view_w} {view_h}\">",
        );

        // Background
        let bg = &self.config.background;
        let bg_alpha = f32::from(bg[3]) / 255.0;
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"rgb({},{},{})\" fill-opacity=\"{bg_alpha}\"/>",
            bg[0], bg[1], bg[2],
        );

        for (idx, item) in scene.paint_order().into_iter().enumerate() {
            render_item_svg(&mut svg, idx, item);
        }

        svg.push_str("</svg>");
        svg
    }

    /// Output dimensions (width, height) in pixels after scaling.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn output_dimensions(&self) -> (u32, u32) {
        let scale = if self.config.scale.is_finite() && self.config.scale > 0.0 {
            self.config.scale
        } else {
            1.0
        };
        let out_w = (self.config.width as f32 * scale).round() as u32;
        let out_h = (self.config.height as f32 * scale).round() as u32;
        (out_w.max(1), out_h.max(1))
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize_svg(svg_string: &str) -> RenderResult<tiny_skia::Pixmap> {
        let mut opt = usvg::Options::default();
        opt.fontdb_mut().load_system_fonts();
        let tree = usvg::Tree::from_str(svg_string, &opt)
            .map_err(|e| RenderError::Export(format!("SVG parsing failed: {e}")))?;

        let px_w = tree.size().width().round() as u32;
        let px_h = tree.size().height().round() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Export("Failed to create pixmap".to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

impl SceneRasterizer for SceneExporter {
    fn rasterize(&self, scene: &Scene, request: &CaptureRequest) -> LayoutResult<RasterImage> {
        let exporter = Self::new(ExportConfig {
            jpeg_quality: self.config.jpeg_quality,
            ..ExportConfig::from_request(request)
        });
        let (width, height) = exporter.output_dimensions();
        let data = exporter.render_to_png(scene)?;
        tracing::debug!("Rasterized {} items to {width}x{height} PNG", scene.len());

        Ok(RasterImage {
            mime_type: "image/png".to_string(),
            data,
            width,
            height,
        })
    }
}

/// Render a single item to SVG.
///
/// `idx` keeps clip-path ids unique within the document.
fn render_item_svg(svg: &mut String, idx: usize, item: &LayoutItem) {
    let tf = &item.transform;
    let (cx, cy) = tf.center();

    let clip = item.style.clip_path.as_ref().map(|c| c.resolve(tf));
    let rounded = item.kind.is_image() && item.border_radius > 0.0;

    if clip.is_some() || rounded {
        svg.push_str("<defs>");
        if let Some(geometry) = &clip {
            let _ = write!(svg, "<clipPath id=\"clip-{idx}\">");
            write_clip_geometry(svg, geometry);
            svg.push_str("</clipPath>");
        }
        if rounded {
            let r = item.border_radius;
            let _ = write!(
                svg,
                "<clipPath id=\"round-{idx}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\"/></clipPath>",
                tf.x, tf.y, tf.width, tf.height,
            );
        }
        svg.push_str("</defs>");
    }

    let _ = write!(
        svg,
        "<g transform=\"rotate({} {cx} {cy})\">",
        tf.rotation
    );
    if clip.is_some() {
        let _ = write!(svg, "<g clip-path=\"url(#clip-{idx})\">");
    }
    if rounded {
        let _ = write!(svg, "<g clip-path=\"url(#round-{idx})\">");
    }

    match &item.kind {
        ItemKind::Image { src } => {
            let escaped_src = escape_xml(src);
            let _ = write!(
                svg,
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" xlink:href=\"{escaped_src}\"/>",
                tf.x, tf.y, tf.width, tf.height,
            );
        }

        ItemKind::Text { content } => {
            let escaped = escape_xml(content);
            let text_y = tf.y + TEXT_FONT_SIZE;
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{text_y}\" font-size=\"{TEXT_FONT_SIZE}\" fill=\"#000000\" font-family=\"sans-serif\">{escaped}</text>",
                tf.x,
            );
        }

        ItemKind::Shape { shape, color } => {
            let fill = escape_xml(color);
            render_shape_svg(svg, *shape, &fill, item);
        }
    }

    if rounded {
        svg.push_str("</g>");
    }
    if clip.is_some() {
        svg.push_str("</g>");
    }
    svg.push_str("</g>");
}

fn render_shape_svg(svg: &mut String, shape: ShapeKind, fill: &str, item: &LayoutItem) {
    let tf = &item.transform;
    match shape {
        ShapeKind::Rectangle => {
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\"/>",
                tf.x, tf.y, tf.width, tf.height,
            );
        }
        ShapeKind::Circle => {
            // Percent of each side, as CSS border-radius does.
            let pct = item.border_radius.clamp(0.0, 50.0) / 100.0;
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{fill}\"/>",
                tf.x,
                tf.y,
                tf.width,
                tf.height,
                tf.width * pct,
                tf.height * pct,
            );
        }
        ShapeKind::Line => {
            let mid_y = tf.y + tf.height / 2.0;
            let _ = write!(
                svg,
                "<line x1=\"{}\" y1=\"{mid_y}\" x2=\"{}\" y2=\"{mid_y}\" stroke=\"{fill}\" stroke-width=\"{LINE_STROKE_WIDTH}\"/>",
                tf.x,
                tf.x + tf.width,
            );
        }
    }
}

fn write_clip_geometry(svg: &mut String, geometry: &ClipGeometry) {
    match geometry {
        ClipGeometry::Rect {
            x,
            y,
            width,
            height,
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{}\" height=\"{}\"/>",
                width.max(0.0),
                height.max(0.0),
            );
        }
        ClipGeometry::Polygon(points) => {
            svg.push_str("<polygon points=\"");
            for (i, (x, y)) in points.iter().enumerate() {
                if i > 0 {
                    svg.push(' ');
                }
                let _ = write!(svg, "{x},{y}");
            }
            svg.push_str("\"/>");
        }
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_core::crop::{rect_clip, CropInsets};
    use layout_core::{ItemPatch, Transform};

    fn text_item(content: &str, x: f32, y: f32) -> LayoutItem {
        LayoutItem::new(ItemKind::Text {
            content: content.to_string(),
        })
        .with_transform(Transform {
            x,
            y,
            width: 200.0,
            height: 30.0,
            rotation: 0.0,
            z_index: 0,
        })
    }

    fn shape_item(shape: ShapeKind) -> LayoutItem {
        LayoutItem::new(ItemKind::Shape {
            shape,
            color: "#3b82f6".to_string(),
        })
        .with_transform(Transform {
            x: 10.0,
            y: 10.0,
            width: 80.0,
            height: 40.0,
            rotation: 0.0,
            z_index: 0,
        })
    }

    fn small_exporter() -> SceneExporter {
        SceneExporter::new(ExportConfig {
            width: 100,
            height: 100,
            ..Default::default()
        })
    }

    #[test]
    fn test_svg_export_empty_scene() {
        let exporter = SceneExporter::with_defaults();
        let svg = exporter.render_to_svg(&Scene::new());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"1200\""));
        assert!(svg.contains("height=\"800\""));
    }

    #[test]
    fn test_svg_export_with_text() {
        let (scene, _) = Scene::new().add_item(text_item("Hello World", 10.0, 20.0));
        let svg = SceneExporter::with_defaults().render_to_svg(&scene);
        assert!(svg.contains("Hello World"));
        assert!(svg.contains("font-size=\"16\""));
    }

    #[test]
    fn test_png_export_produces_valid_bytes() {
        let (scene, _) = Scene::new().add_item(text_item("Test", 10.0, 20.0));
        let png = small_exporter().render_to_png(&scene).expect("png export");

        // PNG magic bytes: \x89PNG
        assert!(png.len() > 8);
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_jpeg_export_produces_valid_bytes() {
        let (scene, _) = Scene::new().add_item(shape_item(ShapeKind::Rectangle));
        let jpeg = small_exporter().render_to_jpeg(&scene).expect("jpeg export");

        // JPEG magic bytes: FFD8
        assert!(jpeg.len() > 2);
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[test]
    fn test_shapes() {
        let scene = Scene::new();
        let (scene, _) = scene.add_item(shape_item(ShapeKind::Rectangle));
        let (scene, _) = scene.add_item(shape_item(ShapeKind::Circle).with_border_radius(50.0));
        let (scene, _) = scene.add_item(shape_item(ShapeKind::Line));

        let svg = small_exporter().render_to_svg(&scene);
        assert!(svg.contains("rx=\"40\" ry=\"20\""));
        assert!(svg.contains("<line x1=\"10\" y1=\"30\" x2=\"90\" y2=\"30\""));
        assert!(svg.contains("fill=\"#3b82f6\""));
    }

    #[test]
    fn test_rotation_about_center() {
        let (scene, id) = Scene::new().add_item(shape_item(ShapeKind::Rectangle));
        let scene = scene.update_item(
            id,
            &ItemPatch {
                rotation: Some(45.0),
                ..Default::default()
            },
        );
        let svg = small_exporter().render_to_svg(&scene);
        assert!(svg.contains("rotate(45 50 30)"));
    }

    #[test]
    fn test_crop_clip_emitted() {
        let image = LayoutItem::new(ItemKind::Image {
            src: "data:image/png;base64,AAAA".to_string(),
        })
        .with_transform(Transform {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
            rotation: 0.0,
            z_index: 0,
        });
        let (scene, id) = Scene::new().add_item(image);
        let scene = scene.update_item(
            id,
            &ItemPatch::clip(rect_clip(CropInsets {
                top: 10.0,
                right: 10.0,
                bottom: 10.0,
                left: 20.0,
            })),
        );

        let svg = small_exporter().render_to_svg(&scene);
        let clip = r#"<clipPath id="clip-0"><rect x="20" y="5" width="70" height="40"/>"#;
        assert!(svg.contains(clip));
        assert!(svg.contains("clip-path=\"url(#clip-0)\""));
    }

    #[test]
    fn test_rounded_image_clip() {
        let image = LayoutItem::new(ItemKind::Image {
            src: "x.png".to_string(),
        })
        .with_border_radius(12.0);
        let (scene, _) = Scene::new().add_item(image);
        let svg = small_exporter().render_to_svg(&scene);
        assert!(svg.contains("rx=\"12\" ry=\"12\""));
        assert!(svg.contains("url(#round-0)"));
    }

    #[test]
    fn test_paint_order_follows_z_index() {
        let scene = Scene::new();
        let (scene, _) = scene.add_item(text_item("first", 0.0, 0.0));
        let (scene, second) = scene.add_item(text_item("second", 0.0, 0.0));
        let scene = scene.update_item(
            second,
            &ItemPatch {
                z_index: Some(-5),
                ..Default::default()
            },
        );

        let svg = small_exporter().render_to_svg(&scene);
        let first_at = svg.find("first").expect("first");
        let second_at = svg.find("second").expect("second");
        assert!(second_at < first_at);
    }

    #[test]
    fn test_export_dispatch() {
        let (scene, _) = Scene::new().add_item(text_item("Dispatch", 10.0, 20.0));
        let exporter = small_exporter();

        let png = exporter.export(&scene, ExportFormat::Png).expect("png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);

        let jpeg = exporter.export(&scene, ExportFormat::Jpeg).expect("jpeg");
        assert_eq!(jpeg[0], 0xFF);

        let svg = exporter.export(&scene, ExportFormat::Svg).expect("svg");
        let svg_str = String::from_utf8(svg).expect("utf8");
        assert!(svg_str.starts_with("<svg"));
    }

    #[test]
    fn test_xml_escaping() {
        let (scene, _) = Scene::new().add_item(text_item("A < B & C > D", 10.0, 20.0));
        let svg = small_exporter().render_to_svg(&scene);
        assert!(svg.contains("A &lt; B &amp; C &gt; D"));
    }

    #[test]
    fn test_scale_factor() {
        let exporter = SceneExporter::new(ExportConfig {
            width: 100,
            height: 100,
            scale: 2.0,
            ..Default::default()
        });

        let svg = exporter.render_to_svg(&Scene::new());
        // At 2x scale, output should be 200x200
        assert!(svg.contains("width=\"200\""));
        assert!(svg.contains("height=\"200\""));
        // But viewBox should still map to 100x100
        assert!(svg.contains("viewBox=\"0 0 100 100\""));
        assert_eq!(exporter.output_dimensions(), (200, 200));
    }

    #[test]
    fn test_rasterizer_honors_request() {
        let request = CaptureRequest {
            width: 60.0,
            height: 40.0,
            background: [0, 0, 0, 255],
            scale: 2.0,
        };
        let image = SceneExporter::with_defaults()
            .rasterize(&Scene::new(), &request)
            .expect("raster");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!((image.width, image.height), (120, 80));
        assert_eq!(&image.data[0..4], &[137, 80, 78, 71]);
    }
}
