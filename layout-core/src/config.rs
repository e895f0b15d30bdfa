//! Session-scoped editor configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// Width and height pair used for default item geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in canvas units.
    pub width: f32,
    /// Height in canvas units.
    pub height: f32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Configuration passed into an [`Editor`](crate::Editor) for its whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Distance in canvas units within which a dragged item snaps to a line.
    pub snap_threshold: f32,
    /// Width of the visible canvas region.
    pub canvas_width: f32,
    /// Height of the visible canvas region.
    pub canvas_height: f32,
    /// Background color used when capturing the scene (RGBA).
    pub capture_background: [u8; 4],
    /// Supersampling factor used when capturing the scene.
    pub capture_scale: f32,
    /// Default size of placed image assets.
    pub image_size: Size,
    /// Default size of placed text assets.
    pub text_size: Size,
    /// Default size of new shapes.
    pub shape_size: Size,
    /// Where newly placed items appear (top-left corner).
    pub spawn_origin: (f32, f32),
    /// Fill color for new shapes.
    pub default_shape_color: String,
    /// Border radius (percent) for new circles.
    pub default_circle_radius: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 10.0,
            canvas_width: 1200.0,
            canvas_height: 800.0,
            capture_background: [255, 255, 255, 255],
            capture_scale: 2.0,
            image_size: Size::new(200.0, 200.0),
            text_size: Size::new(240.0, 60.0),
            shape_size: Size::new(120.0, 120.0),
            spawn_origin: (40.0, 40.0),
            default_shape_color: "#3b82f6".to_string(),
            default_circle_radius: 50.0,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are out of range.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Check that every numeric setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Config`] naming the first invalid field.
    pub fn validate(&self) -> LayoutResult<()> {
        let positive = [
            ("snap_threshold", self.snap_threshold),
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("capture_scale", self.capture_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                tracing::warn!("Rejected editor config: {name} = {value}");
                return Err(LayoutError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "snap_threshold": 6.5 }"#).expect("config");
        assert!((config.snap_threshold - 6.5).abs() < f32::EPSILON);
        assert!((config.capture_scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.default_shape_color, "#3b82f6");
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let err = EditorConfig::from_json(r#"{ "capture_scale": 0 }"#).unwrap_err();
        assert!(matches!(err, LayoutError::Config(msg) if msg.contains("capture_scale")));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EditorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LayoutError::Serialization(_)));
    }
}
