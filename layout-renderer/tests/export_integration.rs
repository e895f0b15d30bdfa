//! Integration tests for scene export and the rasterizer seam.
//!
//! Exercises export formats, crop clipping, and the save-layout flow through
//! the editor with a real rasterizer.

use std::io::Write;

use layout_core::{
    Asset, AssetKind, AssetLibrary, AssetProvider, CropEdge, Editor, EditorConfig, ItemId,
    ItemKind, PropertyEdit, ShapeKind,
};
use layout_renderer::export::{ExportConfig, ExportFormat, SceneExporter};
use layout_renderer::{import_local_image, RenderError};

// 1x1 red pixel.
const PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

fn png_magic(bytes: &[u8]) -> bool {
    bytes.len() > 8 && bytes[0..4] == [137, 80, 78, 71]
}

/// A small canvas keeps rasterization fast.
fn small_editor() -> Editor {
    Editor::new(EditorConfig {
        canvas_width: 160.0,
        canvas_height: 120.0,
        capture_scale: 1.0,
        ..EditorConfig::default()
    })
}

/// Click an item without moving it, leaving it selected.
fn click(editor: &mut Editor, id: ItemId) {
    let t = editor.scene().get(id).map(|i| i.transform).unwrap_or_default();
    editor.pointer_down(id, t.x + 1.0, t.y + 1.0);
    editor.pointer_up();
}

fn image_asset() -> Asset {
    Asset::new(AssetKind::Image, format!("data:image/png;base64,{PNG_BASE64}"))
}

#[test]
fn test_export_all_formats() {
    let mut editor = small_editor();
    editor.add_shape(ShapeKind::Rectangle);
    editor.add_shape(ShapeKind::Circle);
    editor.add_shape(ShapeKind::Line);
    editor.place_asset(&Asset::new(AssetKind::Text, "Caption"));

    let exporter = SceneExporter::new(ExportConfig {
        width: 160,
        height: 120,
        ..Default::default()
    });
    let scene = editor.capture_scene();

    let png = exporter.export(&scene, ExportFormat::Png).expect("png");
    assert!(png_magic(&png));

    let jpeg = exporter.export(&scene, ExportFormat::Jpeg).expect("jpeg");
    assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

    let svg = String::from_utf8(exporter.export(&scene, ExportFormat::Svg).expect("svg"))
        .expect("utf8");
    assert!(svg.contains("Caption"));
    assert!(svg.contains("<line"));
}

#[test]
fn test_cropped_image_exports_clip_region() {
    let mut editor = small_editor();
    let id = editor.place_asset(&image_asset()).expect("image placed");
    click(&mut editor, id);
    assert!(editor.start_crop(id));
    for edge in [CropEdge::Top, CropEdge::Right, CropEdge::Bottom, CropEdge::Left] {
        editor.set_crop_inset(edge, 10.0);
    }
    assert!(editor.apply_crop());

    let item = editor.scene().get(id).expect("item");
    assert_eq!(
        item.style.clip_path.as_ref().map(ToString::to_string).as_deref(),
        Some("inset(10% 10% 10% 10%)")
    );

    let exporter = SceneExporter::new(ExportConfig {
        width: 160,
        height: 120,
        ..Default::default()
    });
    let svg = exporter.render_to_svg(editor.scene());
    assert!(svg.contains("<clipPath id=\"clip-0\">"));
    assert!(svg.contains("url(#clip-0)"));

    // The embedded data URI decodes, so the raster path succeeds too.
    let png = exporter.render_to_png(editor.scene()).expect("png");
    assert!(png_magic(&png));
}

#[test]
fn test_rotation_survives_export() {
    let mut editor = small_editor();
    let id = editor.add_shape(ShapeKind::Rectangle).expect("added");
    click(&mut editor, id);
    assert!(editor.apply_property(PropertyEdit::Rotation(30.0)));

    let svg = SceneExporter::with_defaults().render_to_svg(editor.scene());
    assert!(svg.contains("rotate(30 "));
}

#[test]
fn test_export_image_through_editor() {
    let mut editor = small_editor();
    editor.add_shape(ShapeKind::Rectangle);

    let image = editor
        .export_image(&SceneExporter::with_defaults())
        .expect("raster");
    assert_eq!(image.mime_type, "image/png");
    assert_eq!((image.width, image.height), (160, 120));
    assert!(png_magic(&image.data));
}

#[test]
fn test_capture_scale_multiplies_dimensions() {
    let mut editor = Editor::new(EditorConfig {
        canvas_width: 50.0,
        canvas_height: 40.0,
        capture_scale: 2.0,
        ..EditorConfig::default()
    });
    editor.add_shape(ShapeKind::Circle);

    let image = editor
        .export_image(&SceneExporter::with_defaults())
        .expect("raster");
    assert_eq!((image.width, image.height), (100, 80));
}

#[test]
fn test_save_layout_registers_asset() {
    let mut editor = small_editor();
    editor.add_shape(ShapeKind::Rectangle);
    let mut library = AssetLibrary::new();

    let asset = editor
        .save_layout_asset(&SceneExporter::with_defaults(), &mut library)
        .expect("saved");

    assert_eq!(asset.kind, AssetKind::Image);
    assert!(asset.content.starts_with("data:image/png;base64,"));
    assert_eq!(asset.prompt(), Some("Saved Layout"));
    assert_eq!(library.len(), 1);
    assert!(library.find(&asset.id).is_some());

    // The saved layout can be placed back onto the canvas.
    let placed = editor.place_asset(&asset).expect("placed");
    assert!(matches!(
        editor.scene().get(placed).map(|item| &item.kind),
        Some(ItemKind::Image { .. })
    ));
}

#[test]
fn test_import_local_image() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("dot.png");
    let bytes = {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(PNG_BASE64)
            .expect("fixture")
    };
    std::fs::write(&path, bytes).expect("write");

    let asset = import_local_image(&path).expect("import");
    assert_eq!(asset.kind, AssetKind::Image);
    assert_eq!(asset.prompt(), Some("dot.png"));

    let mut editor = small_editor();
    let id = editor.place_asset(&asset).expect("placed");
    let item = editor.scene().get(id).expect("item");
    assert!(matches!(&item.kind, ItemKind::Image { src } if src.starts_with("data:image/png")));
}

#[test]
fn test_import_rejects_unknown_format() {
    let mut file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("temp file");
    write!(file, "plain text, not pixels").expect("write");

    let err = import_local_image(file.path()).unwrap_err();
    assert!(matches!(err, RenderError::Resource(_)));
}

#[test]
fn test_import_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = import_local_image(dir.path().join("absent.png")).unwrap_err();
    assert!(matches!(err, RenderError::Io(_)));
}
