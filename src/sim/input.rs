//! Pointer gesture capture
//!
//! Builds the traced shape while the player drags, drawing each new piece on
//! the user-input layer as it arrives. Points are already in the drawing
//! area's local space.

use glam::Vec2;

use super::scene::{Layer, Scene};
use super::segment::LineStyle;
use super::shape::{Shape, create_line};
use crate::geometry::{Rect, clamp_to_rect};
use crate::presenter::Presenter;

/// Live gesture state
#[derive(Debug, Clone, Default)]
pub struct InputCapture {
    /// Last committed point
    start_pos: Vec2,
    shape: Shape,
    active: bool,
    /// Incremented on every begin; tags delayed trail shutoffs
    gesture: u64,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn gesture(&self) -> u64 {
        self.gesture
    }

    /// The shape traced so far
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Start a new gesture at `point`, wiping the previous one
    pub fn begin(&mut self, point: Vec2, scene: &mut Scene, presenter: &mut dyn Presenter) {
        scene.clear(Layer::UserInput, presenter);
        self.shape = Shape::new();
        self.shape.push(point);
        self.start_pos = point;
        self.active = true;
        self.gesture += 1;
    }

    /// Extend the gesture to `point` (clamped into `area`)
    pub fn drag(
        &mut self,
        point: Vec2,
        area: &Rect,
        style: &LineStyle,
        scene: &mut Scene,
        presenter: &mut dyn Presenter,
    ) {
        if !self.active {
            return;
        }
        let end = clamp_to_rect(point, area);
        let label = format!("Line {}-{}", self.shape.len() - 1, self.shape.len());
        create_line(self.start_pos, end, scene, Layer::UserInput, style, label, presenter);
        self.shape.push(end);
        self.start_pos = end;
    }

    /// Finish the gesture at `point` and hand over the traced shape.
    ///
    /// The terminal point is appended twice; the repeat is the sentinel the
    /// closed-loop test compares against the first vertex.
    pub fn end(
        &mut self,
        point: Vec2,
        area: &Rect,
        style: &LineStyle,
        scene: &mut Scene,
        presenter: &mut dyn Presenter,
    ) -> Option<Shape> {
        if !self.active {
            return None;
        }
        self.drag(point, area, style, scene, presenter);
        let terminal = self.start_pos;
        self.shape.push(terminal);
        self.active = false;
        Some(std::mem::take(&mut self.shape))
    }

    /// Forget any gesture in progress. The gesture counter keeps counting
    /// so shutoffs queued before the reset still match their gesture.
    pub fn reset(&mut self) {
        self.active = false;
        self.shape = Shape::new();
        self.start_pos = Vec2::ZERO;
    }

    /// Drop the gesture and its lines
    pub fn abort(&mut self, scene: &mut Scene, presenter: &mut dyn Presenter) {
        self.active = false;
        self.shape = Shape::new();
        scene.clear(Layer::UserInput, presenter);
    }
}
