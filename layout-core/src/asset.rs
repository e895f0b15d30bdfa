//! Asset library collaborators.
//!
//! Assets are produced outside the editing core (generation backends, local
//! file import) and placed on the canvas as new items. Saving the scene
//! produces a new asset handed back through [`AssetSink`].

use serde::{Deserialize, Serialize};

/// Prompt recorded on assets created from the current layout.
pub const SAVED_LAYOUT_PROMPT: &str = "Saved Layout";

/// Kind of content an asset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Raster image (URI or data URI).
    Image,
    /// Video clip. Listed in the library but not placeable on the canvas.
    Video,
    /// Plain text.
    Text,
}

/// Optional descriptive data attached to an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// The prompt or label the asset was created from.
    pub prompt: Option<String>,
}

/// An entry in the asset library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Library identifier.
    pub id: String,
    /// Content kind.
    pub kind: AssetKind,
    /// Image URI, video URI or text.
    pub content: String,
    /// Optional metadata.
    pub metadata: Option<AssetMetadata>,
}

impl Asset {
    /// Create an asset with a fresh identifier and no metadata.
    #[must_use]
    pub fn new(kind: AssetKind, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            content: content.into(),
            metadata: None,
        }
    }

    /// Attach a prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.metadata = Some(AssetMetadata {
            prompt: Some(prompt.into()),
        });
        self
    }

    /// The recorded prompt, if any.
    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.metadata.as_ref()?.prompt.as_deref()
    }
}

/// Source of assets shown in the library panel.
pub trait AssetProvider {
    /// All available assets, newest last.
    fn assets(&self) -> &[Asset];

    /// Look up an asset by identifier.
    fn find(&self, id: &str) -> Option<&Asset> {
        self.assets().iter().find(|asset| asset.id == id)
    }
}

/// Receiver for assets created by the editor.
pub trait AssetSink {
    /// Called when the editor produced a new asset.
    fn on_asset_created(&mut self, asset: Asset);
}

/// In-memory asset library.
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    assets: Vec<Asset>,
}

impl AssetLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset to the library.
    pub fn register(&mut self, asset: Asset) {
        tracing::debug!("Registered {:?} asset {}", asset.kind, asset.id);
        self.assets.push(asset);
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetProvider for AssetLibrary {
    fn assets(&self) -> &[Asset] {
        &self.assets
    }
}

impl AssetSink for AssetLibrary {
    fn on_asset_created(&mut self, asset: Asset) {
        self.register(asset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_register_and_find() {
        let mut library = AssetLibrary::new();
        let asset = Asset::new(AssetKind::Text, "hello").with_prompt("greeting");
        let id = asset.id.clone();
        library.register(asset);

        assert_eq!(library.len(), 1);
        let found = library.find(&id).expect("asset");
        assert_eq!(found.prompt(), Some("greeting"));
        assert!(library.find("missing").is_none());
    }

    #[test]
    fn test_sink_appends_to_library() {
        let mut library = AssetLibrary::new();
        library.on_asset_created(Asset::new(AssetKind::Image, "data:image/png;base64,AA=="));
        assert_eq!(library.assets()[0].kind, AssetKind::Image);
        assert!(library.assets()[0].prompt().is_none());
    }
}
