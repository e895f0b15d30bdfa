//! Renderer error types.

use layout_core::LayoutError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering or importing images.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Image loading or decoding failed.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// Scene export failed (SVG parsing, pixmap allocation, encoding).
    #[error("Export failed: {0}")]
    Export(String),

    /// Reading a local file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for LayoutError {
    fn from(err: RenderError) -> Self {
        Self::Capture(err.to_string())
    }
}
