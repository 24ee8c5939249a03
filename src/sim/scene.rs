//! Layers of rendered segments
//!
//! Each layer owns its lines; clearing a layer destroys all of them and
//! bumps the layer's generation, so handles issued before the clear no
//! longer resolve even once new lines reuse their indices.

use serde::{Deserialize, Serialize};

use super::segment::LineSegment;
use crate::Color;
use crate::presenter::Presenter;

/// Containers lines are parented under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// The reference outline of the current level
    Task,
    /// The traced shape refitted over the task box for scoring
    Comparison,
    /// Raw lines drawn live under the pointer
    UserInput,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Task, Layer::Comparison, Layer::UserInput];

    fn slot(self) -> usize {
        match self {
            Layer::Task => 0,
            Layer::Comparison => 1,
            Layer::UserInput => 2,
        }
    }
}

/// Reference to one rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentHandle {
    pub layer: Layer,
    pub index: usize,
    /// Layer generation the handle was issued under
    pub generation: u64,
}

/// All rendered lines, by layer
#[derive(Debug, Clone, Default)]
pub struct Scene {
    layers: [Vec<LineSegment>; 3],
    generations: [u64; 3],
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line to a layer and announce it
    pub fn spawn(&mut self, layer: Layer, segment: LineSegment, presenter: &mut dyn Presenter) -> SegmentHandle {
        let lines = &mut self.layers[layer.slot()];
        let handle = SegmentHandle {
            layer,
            index: lines.len(),
            generation: self.generations[layer.slot()],
        };
        presenter.segment_rendered(handle, &segment);
        lines.push(segment);
        handle
    }

    pub fn segments(&self, layer: Layer) -> &[LineSegment] {
        &self.layers[layer.slot()]
    }

    /// Current handle for the line at `index` of `layer`
    pub fn handle(&self, layer: Layer, index: usize) -> Option<SegmentHandle> {
        (index < self.layers[layer.slot()].len()).then(|| SegmentHandle {
            layer,
            index,
            generation: self.generations[layer.slot()],
        })
    }

    pub fn get(&self, handle: SegmentHandle) -> Option<&LineSegment> {
        if !self.is_current(handle) {
            return None;
        }
        self.layers[handle.layer.slot()].get(handle.index)
    }

    fn is_current(&self, handle: SegmentHandle) -> bool {
        self.generations[handle.layer.slot()] == handle.generation
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Vec::is_empty)
    }

    /// Destroy every line of `layer`
    pub fn clear(&mut self, layer: Layer, presenter: &mut dyn Presenter) {
        self.layers[layer.slot()].clear();
        self.generations[layer.slot()] += 1;
        presenter.layer_cleared(layer);
    }

    pub fn clear_all(&mut self, presenter: &mut dyn Presenter) {
        for layer in Layer::ALL {
            self.clear(layer, presenter);
        }
    }

    /// Recolor one line; stale handles are ignored
    pub fn set_color(&mut self, handle: SegmentHandle, color: Color, presenter: &mut dyn Presenter) {
        self.restyle(handle, presenter, |seg| seg.color = color);
    }

    /// Thicken one line to at least `min`; stale handles are ignored
    pub fn set_min_thickness(&mut self, handle: SegmentHandle, min: f32, presenter: &mut dyn Presenter) {
        self.restyle(handle, presenter, |seg| seg.ensure_min_thickness(min));
    }

    /// Paint every line of `layer` with one color and thickness
    pub fn restore(&mut self, layer: Layer, color: Color, thickness: f32, presenter: &mut dyn Presenter) {
        for index in 0..self.layers[layer.slot()].len() {
            let Some(handle) = self.handle(layer, index) else {
                continue;
            };
            self.restyle(handle, presenter, |seg| {
                seg.color = color;
                seg.thickness = thickness;
            });
        }
    }

    fn restyle(
        &mut self,
        handle: SegmentHandle,
        presenter: &mut dyn Presenter,
        apply: impl FnOnce(&mut LineSegment),
    ) {
        if !self.is_current(handle) {
            return;
        }
        if let Some(seg) = self.layers[handle.layer.slot()].get_mut(handle.index) {
            apply(seg);
            presenter.segment_restyled(handle, seg);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::presenter::LogPresenter;
    use crate::sim::segment::LineStyle;

    fn line(i: usize) -> LineSegment {
        let style = LineStyle::new([1.0; 4], 4.0);
        LineSegment::new(Vec2::ZERO, Vec2::new(10.0, i as f32), &style, format!("Line {i}"))
    }

    #[test]
    fn test_spawn_and_clear_layer() {
        let mut p = LogPresenter::new();
        let mut scene = Scene::new();
        let a = scene.spawn(Layer::Task, line(0), &mut p);
        let b = scene.spawn(Layer::Task, line(1), &mut p);
        scene.spawn(Layer::UserInput, line(2), &mut p);
        assert_eq!((a.index, b.index), (0, 1));
        assert_eq!(scene.segments(Layer::Task).len(), 2);

        scene.clear(Layer::Task, &mut p);
        assert!(scene.segments(Layer::Task).is_empty());
        assert_eq!(scene.segments(Layer::UserInput).len(), 1);
        assert!(scene.get(a).is_none());
    }

    #[test]
    fn test_stale_handle_restyle_is_ignored() {
        let mut p = LogPresenter::new();
        let mut scene = Scene::new();
        let h = scene.spawn(Layer::Comparison, line(0), &mut p);
        scene.clear_all(&mut p);
        scene.set_color(h, [0.0; 4], &mut p);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_restore_resets_markers() {
        let mut p = LogPresenter::new();
        let mut scene = Scene::new();
        let h = scene.spawn(Layer::Task, line(0), &mut p);
        scene.set_color(h, [1.0, 0.0, 0.0, 1.0], &mut p);
        scene.set_min_thickness(h, 9.0, &mut p);
        scene.restore(Layer::Task, [1.0; 4], 4.0, &mut p);
        let seg = scene.get(h).unwrap();
        assert_eq!(seg.color, [1.0; 4]);
        assert_eq!(seg.thickness, 4.0);
    }

    #[test]
    fn test_handle_from_before_clear_misses_reused_slot() {
        let mut p = LogPresenter::new();
        let mut scene = Scene::new();
        let old = scene.spawn(Layer::Comparison, line(0), &mut p);
        scene.clear(Layer::Comparison, &mut p);
        let new = scene.spawn(Layer::Comparison, line(1), &mut p);
        assert_eq!(old.index, new.index);

        assert!(scene.get(old).is_none());
        scene.set_color(old, [0.0; 4], &mut p);
        scene.set_min_thickness(old, 9.0, &mut p);
        let seg = scene.get(new).unwrap();
        assert_eq!(seg.color, [1.0; 4]);
        assert_eq!(seg.thickness, 4.0);
        assert_eq!(scene.handle(Layer::Comparison, 0), Some(new));
        assert_eq!(scene.handle(Layer::Comparison, 1), None);
    }
}
