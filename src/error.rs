//! Error types
//!
//! Failed matches are not errors (see `sim::matcher::Verdict`). These cover
//! degenerate geometry, broken coordinate projection and settings I/O.

use thiserror::Error;

/// Geometry that cannot be normalized
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("shape needs at least {needed} vertices, got {got}")]
    TooFewVertices { needed: usize, got: usize },
    /// Every vertex shares the same point, no scale can be derived
    #[error("shape has zero extent on both axes")]
    ZeroExtent,
    #[error("fit target {width}x{height} must be positive and finite")]
    InvalidTarget { width: f32, height: f32 },
}

/// Screen to local conversion failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("target region has zero area")]
    DegenerateRegion,
    #[error("camera viewport {width}x{height} at {pixels_per_unit} px/unit is unusable")]
    InvalidCamera {
        width: f32,
        height: f32,
        pixels_per_unit: f32,
    },
}

/// Loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}
