//! Game settings and tunables
//!
//! Loaded from a JSON file next to the binary; missing or broken files fall
//! back to the defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::geometry::Rect;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timer ===
    /// Round time at level 0 (milliseconds)
    pub start_time_ms: u32,
    /// Round time removed per completed level (milliseconds)
    pub level_delta_time_ms: u32,
    /// Round time never drops below this (milliseconds)
    pub min_time_ms: u32,

    // === Delays ===
    /// How long "Correct!" / "Wrong" stays up (seconds)
    pub message_time_secs: f32,
    /// Pointer trail lingers this long after the gesture ends (seconds)
    pub trail_off_secs: f32,

    // === Matching ===
    /// Max per-axis gap between first and last traced point
    pub closing_tolerance: f32,
    /// Thickness forced onto near-miss and unvisited markers
    pub marker_min_thickness: f32,
    /// Thickness of every rendered line
    pub line_thickness: f32,

    // === Layout ===
    /// Box templates and traced shapes are fitted into
    pub task_box: Vec2,
    /// Drawing area in its own local space
    pub draw_area: Rect,
    /// World position of the drawing area's origin
    pub draw_origin: Vec2,

    /// Fixed RNG seed for template order (None = time based)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_time_ms: START_TIME_MS,
            level_delta_time_ms: LEVEL_DELTA_TIME_MS,
            min_time_ms: MIN_TIME_MS,

            message_time_secs: MESSAGE_TIME_SECS,
            trail_off_secs: TRAIL_OFF_SECS,

            closing_tolerance: CLOSING_TOLERANCE,
            marker_min_thickness: MARKER_MIN_THICKNESS,
            line_thickness: LINE_THICKNESS,

            task_box: Vec2::new(300.0, 300.0),
            draw_area: Rect::from_center_size(Vec2::ZERO, Vec2::new(800.0, 600.0)),
            draw_origin: Vec2::ZERO,

            seed: None,
        }
    }
}

impl Settings {
    /// Round time after `score` completed levels
    pub fn level_time(&self, score: u32) -> u32 {
        let reduction = u64::from(self.level_delta_time_ms) * u64::from(score);
        let remaining = u64::from(self.start_time_ms).saturating_sub(reduction);
        remaining.max(u64::from(self.min_time_ms)) as u32
    }

    /// Parse settings; unusable layout values are replaced by the defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Replace a task box or drawing area nothing could be fitted into
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let task_box_ok = self.task_box.x > 0.0 && self.task_box.y > 0.0 && self.task_box.is_finite();
        if !task_box_ok {
            log::warn!("Invalid task box {:?}, using {:?}", self.task_box, defaults.task_box);
            self.task_box = defaults.task_box;
        }
        let area = self.draw_area.area();
        let draw_area_ok = self.draw_area.width() > 0.0 && self.draw_area.height() > 0.0 && area.is_finite();
        if !draw_area_ok {
            log::warn!("Invalid drawing area {:?}, using {:?}", self.draw_area, defaults.draw_area);
            self.draw_area = defaults.draw_area;
        }
        self
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::info!("Using default settings ({err})");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_time_progression() {
        let settings = Settings::default();
        assert_eq!(settings.level_time(0), 10_000);
        assert_eq!(settings.level_time(1), 9_900);
        assert_eq!(settings.level_time(95), 500);
        assert_eq!(settings.level_time(96), 500);
        assert_eq!(settings.level_time(u32::MAX), 500);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "start_time_ms": 4000, "seed": 7 }"#).unwrap();
        assert_eq!(settings.start_time_ms, 4000);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.min_time_ms, MIN_TIME_MS);
        assert_eq!(settings.task_box, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.closing_tolerance = 12.5;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_unusable_layout_falls_back_to_defaults() {
        let json = r#"{
            "task_box": [0.0, 300.0],
            "draw_area": { "min": [10.0, 10.0], "max": [10.0, 50.0] },
            "closing_tolerance": 12.0
        }"#;
        let settings = Settings::from_json(json).unwrap();
        let defaults = Settings::default();
        assert_eq!(settings.task_box, defaults.task_box);
        assert_eq!(settings.draw_area, defaults.draw_area);
        assert_eq!(settings.closing_tolerance, 12.0);

        let odd = Settings {
            task_box: Vec2::new(f32::NAN, 10.0),
            ..Default::default()
        };
        assert_eq!(odd.sanitized().task_box, defaults.task_box);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/definitely/not/here/settings.json"));
        assert_eq!(settings, Settings::default());
    }
}
