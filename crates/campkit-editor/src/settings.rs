//! Editor preferences
//!
//! Per-editor settings with serde round-tripping so a host can persist
//! them alongside its own configuration. Changing a setting never
//! touches the map document or the history.

use campkit_core::constants::{DEFAULT_GRID_SIZE, DEFAULT_ROTATION_SNAP, HISTORY_LIMIT};
use serde::{Deserialize, Serialize};

/// Editor preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Draw the background grid
    pub show_grid: bool,
    /// Grid cell size in plan units
    pub grid_size: f64,
    /// Snap dragged and resized geometry to the grid
    pub snap_to_grid: bool,
    /// Snap rotation gestures to fixed increments
    pub snap_rotation: bool,
    /// Rotation snap increment in degrees
    pub rotation_snap_angle: f64,
    /// Maximum number of undo steps kept
    pub history_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: true,
            snap_rotation: true,
            rotation_snap_angle: DEFAULT_ROTATION_SNAP,
            history_limit: HISTORY_LIMIT,
        }
    }
}

impl EditorSettings {
    /// Grid size for snapping, `None` while snapping is off.
    pub fn snap_grid(&self) -> Option<f64> {
        if self.snap_to_grid && self.grid_size > 0.0 {
            Some(self.grid_size)
        } else {
            None
        }
    }

    /// Rotation increment for snapping, `None` while snapping is off.
    pub fn snap_angle(&self) -> Option<f64> {
        if self.snap_rotation && self.rotation_snap_angle > 0.0 {
            Some(self.rotation_snap_angle)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EditorSettings::default();
        assert!(settings.show_grid);
        assert_eq!(settings.grid_size, 20.0);
        assert_eq!(settings.rotation_snap_angle, 15.0);
        assert_eq!(settings.history_limit, 50);
        assert_eq!(settings.snap_grid(), Some(20.0));
        assert_eq!(settings.snap_angle(), Some(15.0));
    }

    #[test]
    fn test_snap_accessors_respect_toggles() {
        let settings = EditorSettings {
            snap_to_grid: false,
            snap_rotation: false,
            ..Default::default()
        };
        assert_eq!(settings.snap_grid(), None);
        assert_eq!(settings.snap_angle(), None);
    }

    #[test]
    fn test_round_trip_and_partial_parse() {
        let settings = EditorSettings {
            grid_size: 25.0,
            show_grid: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: EditorSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);

        // Missing fields fall back to defaults.
        let partial: EditorSettings = serde_json::from_str(r#"{"gridSize": 40.0}"#).unwrap();
        assert_eq!(partial.grid_size, 40.0);
        assert!(partial.show_grid);
    }
}
