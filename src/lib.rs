//! Shape Tracer - redraw the outline before the timer runs out
//!
//! Core modules:
//! - `geometry`: Rectangles, angles, screen to local projection
//! - `sim`: Shapes, input capture, matching and the level controller
//! - `presenter`: Collaborator trait the host implements to show the game
//! - `settings`: Data-driven tunables

pub mod error;
pub mod geometry;
pub mod presenter;
pub mod settings;
pub mod sim;

pub use error::{ProjectionError, SettingsError, ShapeError};
pub use presenter::{LogPresenter, Panel, Presenter};
pub use settings::Settings;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Game configuration constants
pub mod consts {
    /// Round time at level 0 (ms)
    pub const START_TIME_MS: u32 = 10_000;
    /// Time removed per completed level (ms)
    pub const LEVEL_DELTA_TIME_MS: u32 = 100;
    /// Floor for the round time (ms)
    pub const MIN_TIME_MS: u32 = 500;

    /// Result message display time (seconds)
    pub const MESSAGE_TIME_SECS: f32 = 3.0;
    /// Delay before the pointer trail switches off (seconds)
    pub const TRAIL_OFF_SECS: f32 = 1.0;

    /// Max per-axis distance between first and last traced point
    pub const CLOSING_TOLERANCE: f32 = 30.0;
    /// Markers are at least this thick
    pub const MARKER_MIN_THICKNESS: f32 = 5.0;
    pub const LINE_THICKNESS: f32 = 4.0;

    pub const MESSAGE_CORRECT: &str = "Correct!";
    pub const MESSAGE_WRONG: &str = "Wrong.\nTry again.";
}

/// Line and message colors
pub mod palette {
    use crate::Color;

    pub const TASK_LINE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const INPUT_LINE: Color = [1.0, 0.85, 0.2, 1.0];
    pub const TRACE_LINE: Color = [0.55, 0.55, 0.6, 1.0];
    pub const MATCHED: Color = [0.2, 0.85, 0.3, 1.0];
    /// Open loop endpoints
    pub const NEAR_MISS: Color = [0.2, 0.4, 1.0, 1.0];
    /// Reference segments nobody traced
    pub const UNVISITED: Color = [0.95, 0.2, 0.2, 1.0];

    pub const MESSAGE_CORRECT: Color = [0.2, 0.85, 0.3, 1.0];
    pub const MESSAGE_WRONG: Color = [0.95, 0.2, 0.2, 1.0];
}
