//! Shared helpers for layout-core integration tests.

#![allow(dead_code)]

use layout_core::{Editor, ItemId, ItemKind, LayoutItem, Transform};

/// Route `tracing` output through the test harness (`RUST_LOG=debug` to see it).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Add an image item at the given position.
pub fn add_image(editor: &mut Editor, x: f32, y: f32, width: f32, height: f32) -> ItemId {
    editor
        .add_item(
            LayoutItem::new(ItemKind::Image {
                src: "https://assets.example/photo.png".to_string(),
            })
            .with_transform(Transform {
                x,
                y,
                width,
                height,
                ..Transform::default()
            }),
        )
        .expect("item added")
}

/// Add a text item at the given position.
pub fn add_text(editor: &mut Editor, content: &str, x: f32, y: f32) -> ItemId {
    editor
        .add_item(
            LayoutItem::new(ItemKind::Text {
                content: content.to_string(),
            })
            .with_transform(Transform {
                x,
                y,
                width: 240.0,
                height: 60.0,
                ..Transform::default()
            }),
        )
        .expect("item added")
}

/// Click an item without moving it, leaving it selected.
pub fn click(editor: &mut Editor, id: ItemId) {
    let t = editor.scene().get(id).map(|i| i.transform).unwrap_or_default();
    editor.pointer_down(id, t.x + 1.0, t.y + 1.0);
    editor.pointer_up();
}
