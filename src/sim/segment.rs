//! Rendered line segments and their colliders
//!
//! A segment is a unit line placed at `origin`, rotated by `angle` degrees and
//! stretched to `length`. Its collider is the axis-aligned bounds of the
//! thick rectangle it covers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::geometry::{Rect, signed_angle};

/// Look of freshly created lines (the "prefab" a layer instantiates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub thickness: f32,
}

impl LineStyle {
    pub fn new(color: Color, thickness: f32) -> Self {
        Self { color, thickness }
    }
}

/// A thick straight line between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub label: String,
    /// Start point (local space of the owning layer)
    pub origin: Vec2,
    /// Signed rotation from +X (degrees)
    pub angle: f32,
    pub length: f32,
    pub thickness: f32,
    pub color: Color,
}

impl LineSegment {
    pub fn new(from: Vec2, to: Vec2, style: &LineStyle, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            origin: from,
            angle: signed_angle(from, to),
            length: from.distance(to),
            thickness: style.thickness,
            color: style.color,
        }
    }

    /// Unit direction along the line
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle.to_radians())
    }

    /// End point
    pub fn end(&self) -> Vec2 {
        self.origin + self.direction() * self.length
    }

    /// Collider: bounds of the rotated rectangle
    pub fn bounds(&self) -> Rect {
        let dir = self.direction();
        let half_width = Vec2::new(-dir.y, dir.x) * (self.thickness / 2.0);
        let end = self.end();
        Rect::from_points([
            self.origin + half_width,
            self.origin - half_width,
            end + half_width,
            end - half_width,
        ])
        .unwrap_or(Rect::new(self.origin, self.origin))
    }

    /// Center of the collider
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Thicken to at least `min` (markers stay visible on short lines)
    pub fn ensure_min_thickness(&mut self, min: f32) {
        if self.thickness < min {
            self.thickness = min;
        }
    }
}
