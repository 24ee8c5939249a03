//! Presentation collaborator
//!
//! The core never draws. It reports what changed and the host mirrors it in
//! whatever UI it owns.

use glam::Vec2;

use crate::Color;
use crate::sim::{Layer, LineSegment, SegmentHandle};

/// Named UI regions the controller toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    MainMenu,
    GameMenu,
    MessageBox,
    EndMenu,
}

impl Panel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Panel::MainMenu => "main-menu",
            Panel::GameMenu => "game-menu",
            Panel::MessageBox => "message-box",
            Panel::EndMenu => "end-menu",
        }
    }
}

/// Everything the game asks of its presentation layer
pub trait Presenter {
    /// A new line exists on `handle.layer`
    fn segment_rendered(&mut self, handle: SegmentHandle, segment: &LineSegment);

    /// Color or thickness of an existing line changed
    fn segment_restyled(&mut self, handle: SegmentHandle, segment: &LineSegment);

    /// All lines of a layer were destroyed
    fn layer_cleared(&mut self, layer: Layer);

    fn set_panel_visible(&mut self, panel: Panel, visible: bool);

    /// Populate the message box (the controller shows the panel separately)
    fn set_message(&mut self, text: &str, color: Color);

    fn set_counters(&mut self, score: u32, time_remaining_ms: u32);

    fn set_end_score(&mut self, score: u32);

    /// Pointer trail visibility and position (local to the drawing area)
    fn set_trail(&mut self, active: bool, position: Vec2);

    /// Terminate the application
    fn request_quit(&mut self) {}
}

/// In-game counters line
pub fn counters_text(score: u32, time_remaining_ms: u32) -> String {
    format!(" Score: {score} Time: {time_remaining_ms} ")
}

/// End menu score line
pub fn end_score_text(score: u32) -> String {
    format!("Score: {score}")
}

/// Presenter that narrates to the `log` facade (headless runs, debugging)
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub counters: String,
    pub message: Option<String>,
    pub end_score: Option<String>,
    pub trail_active: bool,
    pub quit_requested: bool,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for LogPresenter {
    fn segment_rendered(&mut self, handle: SegmentHandle, segment: &LineSegment) {
        log::trace!(
            "{:?} {} at ({:.1}, {:.1}) angle {:.1} len {:.1}",
            handle.layer,
            segment.label,
            segment.origin.x,
            segment.origin.y,
            segment.angle,
            segment.length
        );
    }

    fn segment_restyled(&mut self, handle: SegmentHandle, segment: &LineSegment) {
        log::trace!("{:?} {} -> color {:?}", handle.layer, segment.label, segment.color);
    }

    fn layer_cleared(&mut self, layer: Layer) {
        log::trace!("{layer:?} cleared");
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        log::debug!("panel {} {}", panel.as_str(), if visible { "shown" } else { "hidden" });
        if panel == Panel::MessageBox && !visible {
            self.message = None;
        }
    }

    fn set_message(&mut self, text: &str, _color: Color) {
        log::info!("{}", text.replace('\n', " "));
        self.message = Some(text.to_string());
    }

    fn set_counters(&mut self, score: u32, time_remaining_ms: u32) {
        self.counters = counters_text(score, time_remaining_ms);
    }

    fn set_end_score(&mut self, score: u32) {
        let text = end_score_text(score);
        log::info!("Game over - {text}");
        self.end_score = Some(text);
    }

    fn set_trail(&mut self, active: bool, _position: Vec2) {
        self.trail_active = active;
    }

    fn request_quit(&mut self) {
        log::info!("Quit requested");
        self.quit_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_formats() {
        assert_eq!(counters_text(3, 9700), " Score: 3 Time: 9700 ");
        assert_eq!(end_score_text(12), "Score: 12");
    }

    #[test]
    fn test_log_presenter_tracks_message_box() {
        let mut p = LogPresenter::new();
        p.set_message("Correct!", crate::palette::MESSAGE_CORRECT);
        p.set_panel_visible(Panel::MessageBox, true);
        assert_eq!(p.message.as_deref(), Some("Correct!"));
        p.set_panel_visible(Panel::MessageBox, false);
        assert!(p.message.is_none());
    }
}
