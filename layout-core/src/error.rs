//! Error types for layout operations.
//!
//! Editing itself never fails: out-of-range undo, deleting without a
//! selection and similar requests are silent no-ops. These errors cover the
//! edges of the core that touch the outside world.

use thiserror::Error;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors that can occur at the edges of the editing core.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Editor configuration is out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading a configuration or asset file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The scene rasterizer could not produce an image.
    #[error("Scene capture failed: {0}")]
    Capture(String),
}
