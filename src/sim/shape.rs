//! Polyline shapes and the template library
//!
//! A shape is an ordered list of vertices; consecutive pairs form its lines.
//! Templates are closed (first vertex == last vertex) and defined in their
//! own coordinate space, then fitted into the task box when selected.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::scene::{Layer, Scene, SegmentHandle};
use super::segment::{LineSegment, LineStyle};
use crate::error::ShapeError;
use crate::geometry::Rect;
use crate::presenter::Presenter;

/// An ordered polyline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub vertices: Vec<Vec2>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: &[Vec2]) -> Self {
        Self {
            vertices: points.to_vec(),
        }
    }

    pub fn push(&mut self, point: Vec2) {
        self.vertices.push(point);
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn first(&self) -> Option<Vec2> {
        self.vertices.first().copied()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.vertices.last().copied()
    }

    /// First and last vertex coincide
    pub fn is_closed(&self) -> bool {
        self.len() >= 2 && self.first() == self.last()
    }

    /// Bounding box of every vertex but the last.
    ///
    /// The last vertex is either the closing repeat of vertex 0 or the
    /// sentinel duplicate appended when a gesture ends.
    pub fn fit_bounds(&self) -> Option<Rect> {
        let body = self.vertices.split_last().map(|(_, body)| body)?;
        Rect::from_points(body.iter().copied())
    }

    /// Center the shape on the origin and scale it uniformly to fit inside
    /// `width` x `height`. Returns the applied scale.
    ///
    /// An axis with zero extent does not constrain the scale. A shape with
    /// zero extent on both axes is rejected and left untouched.
    pub fn fit(&mut self, width: f32, height: f32) -> Result<f32, ShapeError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ShapeError::InvalidTarget { width, height });
        }
        if self.len() < 2 {
            return Err(ShapeError::TooFewVertices {
                needed: 2,
                got: self.len(),
            });
        }
        let bounds = self.fit_bounds().ok_or(ShapeError::TooFewVertices {
            needed: 2,
            got: self.len(),
        })?;

        let extent = bounds.size();
        let scale = match (extent.x > 0.0, extent.y > 0.0) {
            (true, true) => (width / extent.x).min(height / extent.y),
            (true, false) => width / extent.x,
            (false, true) => height / extent.y,
            (false, false) => return Err(ShapeError::ZeroExtent),
        };

        let center = bounds.center();
        for vertex in &mut self.vertices {
            *vertex = (*vertex - center) * scale;
        }
        Ok(scale)
    }

    /// Render one line per consecutive vertex pair on `layer`
    pub fn create_lines(
        &self,
        scene: &mut Scene,
        layer: Layer,
        style: &LineStyle,
        presenter: &mut dyn Presenter,
    ) -> Vec<SegmentHandle> {
        self.vertices
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let label = format!("Line {}-{}", i, i + 1);
                create_line(pair[0], pair[1], scene, layer, style, label, presenter)
            })
            .collect()
    }
}

/// Render a single line from `from` to `to` on `layer`
pub fn create_line(
    from: Vec2,
    to: Vec2,
    scene: &mut Scene,
    layer: Layer,
    style: &LineStyle,
    label: impl Into<String>,
    presenter: &mut dyn Presenter,
) -> SegmentHandle {
    scene.spawn(layer, LineSegment::new(from, to, style, label), presenter)
}

/// The fixed library of target outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Template {
    Square,
    Triangle,
    HorizontalRectangle,
    VerticalRectangle,
    RightTriangle,
    Diamond,
}

const SQUARE: [Vec2; 5] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 100.0),
    Vec2::new(100.0, 100.0),
    Vec2::new(100.0, 0.0),
    Vec2::new(0.0, 0.0),
];

const TRIANGLE: [Vec2; 4] = [
    Vec2::new(-100.0, 0.0),
    Vec2::new(0.0, 100.0),
    Vec2::new(100.0, 0.0),
    Vec2::new(-100.0, 0.0),
];

const HORIZONTAL_RECTANGLE: [Vec2; 5] = [
    Vec2::new(-100.0, 100.0),
    Vec2::new(-100.0, 200.0),
    Vec2::new(-400.0, 200.0),
    Vec2::new(-400.0, 100.0),
    Vec2::new(-100.0, 100.0),
];

const VERTICAL_RECTANGLE: [Vec2; 5] = [
    Vec2::new(-500.0, -500.0),
    Vec2::new(-400.0, -500.0),
    Vec2::new(-400.0, -1000.0),
    Vec2::new(-500.0, -1000.0),
    Vec2::new(-500.0, -500.0),
];

const RIGHT_TRIANGLE: [Vec2; 4] = [
    Vec2::new(-1000.0, 0.0),
    Vec2::new(-1000.0, 1000.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(-1000.0, 0.0),
];

const DIAMOND: [Vec2; 5] = [
    Vec2::new(0.0, 100.0),
    Vec2::new(50.0, 0.0),
    Vec2::new(0.0, -100.0),
    Vec2::new(-50.0, 0.0),
    Vec2::new(0.0, 100.0),
];

impl Template {
    pub const ALL: [Template; 6] = [
        Template::Square,
        Template::Triangle,
        Template::HorizontalRectangle,
        Template::VerticalRectangle,
        Template::RightTriangle,
        Template::Diamond,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Square => "Square",
            Template::Triangle => "Triangle",
            Template::HorizontalRectangle => "Horizontal rectangle",
            Template::VerticalRectangle => "Vertical rectangle",
            Template::RightTriangle => "Right triangle",
            Template::Diamond => "Diamond",
        }
    }

    pub fn vertices(&self) -> &'static [Vec2] {
        match self {
            Template::Square => &SQUARE,
            Template::Triangle => &TRIANGLE,
            Template::HorizontalRectangle => &HORIZONTAL_RECTANGLE,
            Template::VerticalRectangle => &VERTICAL_RECTANGLE,
            Template::RightTriangle => &RIGHT_TRIANGLE,
            Template::Diamond => &DIAMOND,
        }
    }

    /// A fresh, unfitted copy of the outline
    pub fn shape(&self) -> Shape {
        Shape::from_points(self.vertices())
    }
}

/// Pick a template index in `0..count`, never repeating `last` when there
/// is anything else to choose. `None` when `count` is zero.
pub fn pick_template<R: Rng + ?Sized>(rng: &mut R, last: Option<usize>, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let mut index = rng.random_range(0..count);
    if let Some(last) = last {
        if count >= 2 {
            while index == last {
                index = rng.random_range(0..count);
            }
        }
    }
    Some(index)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::presenter::LogPresenter;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_templates_are_closed() {
        for template in Template::ALL {
            let shape = template.shape();
            assert!(shape.is_closed(), "{} is open", template.as_str());
            assert!(shape.len() >= 4);
        }
    }

    #[test]
    fn test_fit_square_into_box() {
        let mut shape = Template::Square.shape();
        let scale = shape.fit(300.0, 300.0).unwrap();
        assert!((scale - 3.0).abs() < EPS);
        assert_eq!(shape.vertices[0], Vec2::new(-150.0, -150.0));
        assert_eq!(shape.vertices[2], Vec2::new(150.0, 150.0));
        assert!(shape.is_closed());
    }

    #[test]
    fn test_fit_ignores_last_vertex_for_bounds() {
        // Sentinel far outside must not skew the box, but is still transformed
        let mut shape = Shape::from_points(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(1000.0, 1000.0),
        ]);
        shape.fit(20.0, 20.0).unwrap();
        assert_eq!(shape.vertices[0], Vec2::new(-10.0, -10.0));
        assert_eq!(shape.vertices[1], Vec2::new(10.0, 10.0));
        assert_eq!(shape.vertices[2], Vec2::new(1990.0, 1990.0));
    }

    #[test]
    fn test_fit_flat_shape_uses_other_axis() {
        let mut shape = Shape::from_points(&[Vec2::new(0.0, 5.0), Vec2::new(50.0, 5.0), Vec2::new(50.0, 5.0)]);
        let scale = shape.fit(200.0, 100.0).unwrap();
        assert!((scale - 4.0).abs() < EPS);
        assert_eq!(shape.vertices[0], Vec2::new(-100.0, 0.0));
        assert_eq!(shape.vertices[1], Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_fit_rejects_point_shape() {
        let p = Vec2::new(3.0, 3.0);
        let mut shape = Shape::from_points(&[p, p, p]);
        assert_eq!(shape.fit(100.0, 100.0), Err(ShapeError::ZeroExtent));
        assert_eq!(shape.vertices, vec![p, p, p]);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let mut single = Shape::from_points(&[Vec2::ONE]);
        assert!(matches!(single.fit(10.0, 10.0), Err(ShapeError::TooFewVertices { got: 1, .. })));
        let mut square = Template::Square.shape();
        assert!(matches!(square.fit(0.0, 10.0), Err(ShapeError::InvalidTarget { .. })));
        assert!(matches!(square.fit(10.0, f32::NAN), Err(ShapeError::InvalidTarget { .. })));
    }

    #[test]
    fn test_create_lines_labels_pairs() {
        let mut p = LogPresenter::new();
        let mut scene = Scene::new();
        let style = LineStyle::new([1.0; 4], 4.0);
        let shape = Template::Triangle.shape();
        let handles = shape.create_lines(&mut scene, Layer::Task, &style, &mut p);
        assert_eq!(handles.len(), shape.len() - 1);
        let lines = scene.segments(Layer::Task);
        assert_eq!(lines[0].label, "Line 0-1");
        assert_eq!(lines[2].label, "Line 2-3");
        assert!((lines[1].end() - shape.vertices[2]).length() < EPS);
    }

    #[test]
    fn test_pick_template_never_repeats() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut last = None;
        for _ in 0..500 {
            let index = pick_template(&mut rng, last, Template::ALL.len()).unwrap();
            assert!(index < Template::ALL.len());
            assert_ne!(Some(index), last);
            last = Some(index);
        }
    }

    #[test]
    fn test_pick_template_single_choice() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(pick_template(&mut rng, Some(0), 1), Some(0));
    }

    #[test]
    fn test_pick_template_empty_library() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(pick_template(&mut rng, None, 0), None);
        assert_eq!(pick_template(&mut rng, Some(3), 0), None);
    }

    prop_compose! {
        fn closed_polyline()(points in prop::collection::vec((-500.0f32..500.0, -500.0f32..500.0), 3..12)) -> Shape {
            let mut shape = Shape::from_points(&points.iter().map(|&(x, y)| Vec2::new(x, y)).collect::<Vec<_>>());
            let first = shape.vertices[0];
            shape.push(first);
            shape
        }
    }

    proptest! {
        #[test]
        fn fit_centers_and_touches_binding_axis(
            shape in closed_polyline(),
            width in 10.0f32..1000.0,
            height in 10.0f32..1000.0,
        ) {
            let before = shape.fit_bounds().unwrap();
            prop_assume!(before.width() > 1.0 && before.height() > 1.0);

            let mut fitted = shape.clone();
            fitted.fit(width, height).unwrap();
            let after = fitted.fit_bounds().unwrap();
            let tol = 1e-3 * width.max(height);

            prop_assert!(after.center().length() < tol);
            prop_assert!(after.width() <= width + tol);
            prop_assert!(after.height() <= height + tol);
            prop_assert!((after.width() - width).abs() < tol || (after.height() - height).abs() < tol);

            let aspect_before = before.width() / before.height();
            let aspect_after = after.width() / after.height();
            prop_assert!((aspect_before - aspect_after).abs() < 1e-3 * aspect_before.max(1.0));
        }
    }
}
