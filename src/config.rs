//! Editor configuration.
//!
//! All fields have defaults matching the stock canvas layout, so an empty JSON
//! object (`{}`) yields [`EditorConfig::default`].

use crate::error::CanvasError;
use crate::grid::GridBounds;
use serde::Deserialize;

/// Default grid unit in canvas pixels.
pub const DEFAULT_GRID_UNIT: i32 = 24;

/// Geometry and behaviour settings for the canvas editor.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Snap unit for node positions.
    pub grid_unit: i32,
    /// Offset subtracted from the pointer on drop so the new node is centered
    /// under the cursor.
    pub drop_offset: (f32, f32),
    /// Node width and height, used for hit testing.
    pub node_size: (f32, f32),
    /// Where outgoing connectors leave a node, relative to its origin.
    pub source_anchor: (f32, f32),
    /// Where incoming connectors enter a node, relative to its origin.
    pub target_anchor: (f32, f32),
    /// Optional rectangle node origins are clamped into. `None` leaves
    /// positions unbounded.
    pub bounds: Option<GridBounds>,
    /// Whether the background grid is rendered.
    pub show_grid: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_unit: DEFAULT_GRID_UNIT,
            drop_offset: (90.0, 40.0),
            node_size: (200.0, 90.0),
            source_anchor: (180.0, 40.0),
            target_anchor: (0.0, 40.0),
            bounds: None,
            show_grid: false,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CanvasError> {
        let config: EditorConfig = serde_json::from_str(text)
            .map_err(|e| CanvasError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the editor relies on.
    pub fn validate(&self) -> Result<(), CanvasError> {
        if self.grid_unit <= 0 {
            return Err(CanvasError::InvalidConfig(format!(
                "grid unit must be positive, got {}",
                self.grid_unit
            )));
        }
        if self.node_size.0 <= 0.0 || self.node_size.1 <= 0.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "node size must be positive, got {}x{}",
                self.node_size.0, self.node_size.1
            )));
        }
        if let Some(bounds) = &self.bounds {
            if bounds.snapped(self.grid_unit).is_none() {
                return Err(CanvasError::InvalidConfig(format!(
                    "bounds {:?} contain no grid-aligned position",
                    bounds
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
    fn test_default_config_is_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_unit, 24);
        assert_eq!(config.drop_offset, (90.0, 40.0));
        assert!(config.bounds.is_none());
        assert!(!config.show_grid);
    }

    #[test]
    fn test_empty_json_yields_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_json_overrides_fields() {
        let config = EditorConfig::from_json(r#"{"grid_unit": 12, "show_grid": true}"#).unwrap();
        assert_eq!(config.grid_unit, 12);
        assert!(config.show_grid);
        assert_eq!(config.node_size, (200.0, 90.0));
    }

    #[test]
    fn test_bounds_from_json() {
        let config = EditorConfig::from_json(
            r#"{"bounds": {"min_x": 0, "min_y": 0, "max_x": 960, "max_y": 720}}"#,
        )
        .unwrap();
        let bounds = config.bounds.expect("bounds should be set");
        assert_eq!(bounds.max_x, 960);
    }

    #[test]
    fn test_rejects_non_positive_grid_unit() {
        let err = EditorConfig::from_json(r#"{"grid_unit": 0}"#).unwrap_err();
        assert!(matches!(err, CanvasError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_node_size() {
        let config = EditorConfig {
            node_size: (0.0, 90.0),
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bounds_without_grid_position() {
        let config = EditorConfig {
            bounds: Some(GridBounds { min_x: 1, min_y: 0, max_x: 23, max_y: 100 }),
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(EditorConfig::from_json("{ grid_unit: }").is_err());
    }
}
