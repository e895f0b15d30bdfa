//! Local image import.
//!
//! A user-chosen file is read, sniffed, checked to decode, and wrapped as an
//! image [`Asset`] whose content is a base64 data URI, so it can be placed
//! like any other library asset.

use std::path::Path;

use base64::Engine;
use layout_core::{Asset, AssetKind};

use crate::error::{RenderError, RenderResult};

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// WebP (alpha support).
    WebP,
    /// Unknown/other format.
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "webp" => Self::WebP,
            _ => Self::Unknown,
        }
    }

    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::Unknown;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        Self::Unknown
    }

    /// MIME type for data URIs.
    #[must_use]
    pub const fn mime_type(self) -> Option<&'static str> {
        match self {
            Self::Png => Some("image/png"),
            Self::Jpeg => Some("image/jpeg"),
            Self::WebP => Some("image/webp"),
            Self::Unknown => None,
        }
    }
}

/// Basic facts about a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Detected format.
    pub format: ImageFormat,
}

/// Decode raw bytes far enough to confirm they are a usable image.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded.
pub fn inspect_image(data: &[u8]) -> RenderResult<ImageInfo> {
    let format = ImageFormat::from_magic_bytes(data);

    let img = ::image::load_from_memory(data)
        .map_err(|e| RenderError::Resource(format!("Failed to decode image: {e}")))?;

    Ok(ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
    })
}

/// Decode a base64 `data:` URI back into raw bytes.
///
/// # Errors
///
/// Returns an error if the URI is not a base64 data URI.
pub fn decode_data_uri(uri: &str) -> RenderResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::Resource("Not a data URI".to_string()))?;

    let (metadata, encoded) = rest
        .split_once(',')
        .ok_or_else(|| RenderError::Resource("Invalid data URI: missing comma".to_string()))?;

    if !metadata.ends_with(";base64") {
        return Err(RenderError::Resource(
            "Only base64 data URIs are supported".to_string(),
        ));
    }

    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| RenderError::Resource(format!("Failed to decode base64: {e}")))
}

/// Wrap image bytes as an image asset.
///
/// The format is taken from the magic bytes, falling back to `extension_hint`.
///
/// # Errors
///
/// Returns an error if the format is unsupported or the bytes do not decode.
pub fn import_image_bytes(
    data: &[u8],
    extension_hint: Option<&str>,
    label: &str,
) -> RenderResult<Asset> {
    let mut format = ImageFormat::from_magic_bytes(data);
    if format == ImageFormat::Unknown {
        format = extension_hint.map_or(ImageFormat::Unknown, ImageFormat::from_extension);
    }
    let mime = format
        .mime_type()
        .ok_or_else(|| RenderError::Resource(format!("Unsupported image format: {label}")))?;

    let info = inspect_image(data)?;
    tracing::debug!(
        "Imported {label}: {}x{} {:?}",
        info.width,
        info.height,
        format
    );

    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    Ok(Asset::new(AssetKind::Image, format!("data:{mime};base64,{encoded}")).with_prompt(label))
}

/// Read a local image file into an image asset.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a supported image.
pub fn import_local_image(path: impl AsRef<Path>) -> RenderResult<Asset> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let extension = path.extension().and_then(|e| e.to_str());
    let label = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image");
    import_image_bytes(&data, extension, label)
}
