//! Traced shape vs reference outline
//!
//! A deliberately forgiving test: every traced line has to touch some
//! reference collider, every reference collider has to be touched, and the
//! trace has to end near where it started. "Touch" means the traced line's
//! collider center lies in the reference collider, or the two colliders
//! overlap. Over-tracing and wobble pass; skipped edges and open loops fail.

use glam::Vec2;

use super::scene::{Layer, Scene, SegmentHandle};
use super::segment::LineStyle;
use super::shape::Shape;
use crate::Color;
use crate::error::ShapeError;
use crate::palette;
use crate::presenter::Presenter;

/// Knobs for one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRules {
    /// Max per-axis gap between first and last traced point
    pub closing_tolerance: f32,
    /// Thickness forced onto near-miss / unvisited markers
    pub marker_min_thickness: f32,
    /// Look of the refitted traced lines
    pub trace_style: LineStyle,
}

/// Outcome of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

/// Detailed result of `evaluate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    /// Traced lines tested
    pub total: usize,
    /// Traced lines touching at least one reference collider
    pub matched: usize,
    /// Start and end of the trace are close enough
    pub closed: bool,
    /// Reference lines (task layer indices) nothing touched
    pub unvisited: Vec<usize>,
}

impl MatchReport {
    pub fn passed(&self) -> bool {
        self.total == self.matched && self.closed && self.unvisited.is_empty()
    }

    pub fn verdict(&self) -> Verdict {
        if self.passed() { Verdict::Pass } else { Verdict::Fail }
    }
}

/// Both axis gaps between `first` and `last` are within `tolerance`
#[inline]
pub fn closes_loop(first: Vec2, last: Vec2, tolerance: f32) -> bool {
    let gap = (first - last).abs();
    gap.x <= tolerance && gap.y <= tolerance
}

/// Score `traced` against the lines on the task layer.
///
/// The traced shape is fitted into `fit_box` and drawn on the comparison
/// layer; lines are recolored to show what matched and what was missed.
pub fn evaluate(
    scene: &mut Scene,
    traced: &mut Shape,
    fit_box: Vec2,
    rules: &MatchRules,
    presenter: &mut dyn Presenter,
) -> Result<MatchReport, ShapeError> {
    traced.fit(fit_box.x, fit_box.y)?;
    let handles = traced.create_lines(scene, Layer::Comparison, &rules.trace_style, presenter);

    let reference: Vec<_> = scene.segments(Layer::Task).iter().map(|seg| seg.bounds()).collect();
    let mut visited = vec![false; reference.len()];
    let mut matched = 0;

    for &handle in &handles {
        let Some(seg) = scene.get(handle) else {
            continue;
        };
        let bounds = seg.bounds();
        let center = bounds.center();

        let mut is_matched = false;
        for (i, target) in reference.iter().enumerate() {
            if target.contains(center) || bounds.intersects(target) {
                visited[i] = true;
                is_matched = true;
            }
        }

        if is_matched {
            matched += 1;
            scene.set_color(handle, palette::MATCHED, presenter);
        }
    }

    let closed = match (traced.first(), traced.last()) {
        (Some(first), Some(last)) => closes_loop(first, last, rules.closing_tolerance),
        _ => false,
    };
    if !closed {
        if let (Some(&first), Some(&last)) = (handles.first(), handles.last()) {
            mark(scene, first, palette::NEAR_MISS, rules, presenter);
            mark(scene, last, palette::NEAR_MISS, rules, presenter);
        }
    }

    let unvisited: Vec<usize> = visited
        .iter()
        .enumerate()
        .filter_map(|(i, &seen)| (!seen).then_some(i))
        .collect();
    for &index in &unvisited {
        if let Some(handle) = scene.handle(Layer::Task, index) {
            mark(scene, handle, palette::UNVISITED, rules, presenter);
        }
    }

    let report = MatchReport {
        total: handles.len(),
        matched,
        closed,
        unvisited,
    };
    log::debug!(
        "match: {}/{} traced lines, closed={}, {} unvisited -> {:?}",
        report.matched,
        report.total,
        report.closed,
        report.unvisited.len(),
        report.verdict()
    );
    Ok(report)
}

fn mark(scene: &mut Scene, handle: SegmentHandle, color: Color, rules: &MatchRules, presenter: &mut dyn Presenter) {
    scene.set_color(handle, color, presenter);
    scene.set_min_thickness(handle, rules.marker_min_thickness, presenter);
}
